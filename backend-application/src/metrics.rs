use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    analyze_requests: AtomicU64,
    sample_requests: AtomicU64,
    rejected_requests: AtomicU64,
    transactions_scored: AtomicU64,
    suspicious_transactions: AtomicU64,
}

impl Metrics {
    pub fn record_analyze(&self) {
        self.analyze_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sample(&self) {
        self.sample_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.rejected_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_scored(&self, transactions: usize, suspicious: usize) {
        self.transactions_scored
            .fetch_add(transactions as u64, Ordering::Relaxed);
        self.suspicious_transactions
            .fetch_add(suspicious as u64, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let analyze = self.analyze_requests.load(Ordering::Relaxed);
        let sample = self.sample_requests.load(Ordering::Relaxed);
        let rejected = self.rejected_requests.load(Ordering::Relaxed);
        let scored = self.transactions_scored.load(Ordering::Relaxed);
        let suspicious = self.suspicious_transactions.load(Ordering::Relaxed);

        format!(
            "# TYPE fraudscope_analyze_requests_total counter\n\
fraudscope_analyze_requests_total {}\n\
# TYPE fraudscope_sample_requests_total counter\n\
fraudscope_sample_requests_total {}\n\
# TYPE fraudscope_rejected_requests_total counter\n\
fraudscope_rejected_requests_total {}\n\
# TYPE fraudscope_transactions_scored_total counter\n\
fraudscope_transactions_scored_total {}\n\
# TYPE fraudscope_suspicious_transactions_total counter\n\
fraudscope_suspicious_transactions_total {}\n",
            analyze, sample, rejected, scored, suspicious
        )
    }
}
