// Heuristic fraud rules
// Each rule fires independently; the total is capped at MAX_SCORE

pub const MAX_SCORE: f64 = 100.0;

const LARGE_OUTLIER_FACTOR: f64 = 3.0;
const LARGE_OUTLIER_POINTS: f64 = 40.0;
const MICRO_TRANSACTION_LIMIT: f64 = 1.0;
const MICRO_TRANSACTION_POINTS: f64 = 30.0;
const ROUND_NUMBER_FLOOR: f64 = 100.0;
const ROUND_NUMBER_POINTS: f64 = 20.0;
const OFF_HOURS_POINTS: f64 = 25.0;
const OFF_HOURS_START: f64 = 22.0;
const OFF_HOURS_END: f64 = 6.0;

pub fn rule_score(amount: f64, hour: Option<f64>, mean_amount: f64) -> f64 {
    let mut score = 0.0;
    if amount > mean_amount * LARGE_OUTLIER_FACTOR {
        score += LARGE_OUTLIER_POINTS;
    }
    if is_micro_transaction(amount) {
        score += MICRO_TRANSACTION_POINTS;
    }
    if is_round_number(amount) {
        score += ROUND_NUMBER_POINTS;
    }
    if hour.is_some_and(is_off_hours) {
        score += OFF_HOURS_POINTS;
    }
    f64::min(score, MAX_SCORE)
}

pub fn is_micro_transaction(amount: f64) -> bool {
    amount < MICRO_TRANSACTION_LIMIT
}

/// Strictly above 100 and a whole multiple of 100.
pub fn is_round_number(amount: f64) -> bool {
    amount > ROUND_NUMBER_FLOOR && amount % ROUND_NUMBER_FLOOR == 0.0
}

pub fn is_off_hours(hour: f64) -> bool {
    hour < OFF_HOURS_END || hour > OFF_HOURS_START
}
