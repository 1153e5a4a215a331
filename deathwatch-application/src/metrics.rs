use std::sync::atomic::{AtomicU64, Ordering};

use deathwatch_domain::ScanReport;

#[derive(Debug, Default)]
pub struct Metrics {
    scans: AtomicU64,
    scan_errors: AtomicU64,
    deaths_discovered: AtomicU64,
    truncations: AtomicU64,
}

impl Metrics {
    pub fn record_scan(&self, report: &ScanReport) {
        self.scans.fetch_add(1, Ordering::Relaxed);
        self.deaths_discovered
            .fetch_add(report.added as u64, Ordering::Relaxed);
        if report.truncated {
            self.truncations.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_scan_error(&self) {
        self.scan_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let scans = self.scans.load(Ordering::Relaxed);
        let errors = self.scan_errors.load(Ordering::Relaxed);
        let deaths = self.deaths_discovered.load(Ordering::Relaxed);
        let truncations = self.truncations.load(Ordering::Relaxed);

        format!(
            "# TYPE deathwatch_scans_total counter\n\
deathwatch_scans_total {}\n\
# TYPE deathwatch_scan_errors_total counter\n\
deathwatch_scan_errors_total {}\n\
# TYPE deathwatch_deaths_discovered_total counter\n\
deathwatch_deaths_discovered_total {}\n\
# TYPE deathwatch_log_truncations_total counter\n\
deathwatch_log_truncations_total {}\n",
            scans, errors, deaths, truncations
        )
    }
}
