use crate::rounding::round_to;
use core_types::{CalculatorInputs, DerivedMetrics, WORKING_DAYS};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const PERCENT: Decimal = dec!(100);

/// The unrounded quantities behind a [`DerivedMetrics`] snapshot.
///
/// Each stage is computed from the previous stage's *unrounded* value. Rounding
/// happens only when the snapshot is built, so the displayed after-hours figure
/// can differ from the one actually fed into the AI-answered figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMetrics {
    pub after_hours_calls: Decimal,
    pub ai_answered: Decimal,
    pub additional_appointments_daily: Decimal,
    pub additional_appointments_monthly: Decimal,
    pub monthly_revenue_increase: Decimal,
}

impl RawMetrics {
    /// Applies the per-field display precision.
    pub fn rounded(&self) -> DerivedMetrics {
        DerivedMetrics {
            after_hours_calls: round_to(self.after_hours_calls, 0),
            ai_answered: round_to(self.ai_answered, 0),
            additional_appointments_daily: round_to(self.additional_appointments_daily, 2),
            additional_appointments_monthly: round_to(self.additional_appointments_monthly, 1),
            monthly_revenue_increase: round_to(self.monthly_revenue_increase, 2),
        }
    }
}

/// A stateless calculator for deriving the revenue metrics from the slider inputs.
#[derive(Debug, Default, Clone, Copy)]
pub struct RevenueCalculator {}

impl RevenueCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point: maps the five inputs to the five derived metrics.
    ///
    /// Total and deterministic. Inputs are not range-checked here; clamping is
    /// the caller's job and out-of-domain values simply flow through the formula.
    pub fn derive(&self, inputs: &CalculatorInputs) -> DerivedMetrics {
        let metrics = self.derive_unrounded(inputs).rounded();

        tracing::debug!(
            daily_calls = inputs.daily_calls,
            monthly_revenue_increase = %metrics.monthly_revenue_increase,
            "Derived calculator metrics."
        );

        metrics
    }

    /// Runs the derivation pipeline without the final rounding step.
    pub fn derive_unrounded(&self, inputs: &CalculatorInputs) -> RawMetrics {
        // 1. Calls arriving outside business hours
        let after_hours_calls =
            Decimal::from(inputs.daily_calls).saturating_mul(inputs.after_hours_pct) / PERCENT;

        // 2. Calls the agent picks up
        let ai_answered = after_hours_calls.saturating_mul(inputs.ai_answer_rate) / PERCENT;

        // 3. Appointments booked from those calls
        let additional_appointments_daily =
            ai_answered.saturating_mul(inputs.conversion_rate) / PERCENT;

        // 4. Scale to a month of working days
        let additional_appointments_monthly =
            additional_appointments_daily.saturating_mul(Decimal::from(WORKING_DAYS));

        // 5. Revenue
        let monthly_revenue_increase =
            additional_appointments_monthly.saturating_mul(inputs.avg_value);

        RawMetrics {
            after_hours_calls,
            ai_answered,
            additional_appointments_daily,
            additional_appointments_monthly,
            monthly_revenue_increase,
        }
    }
}

/// Shorthand for `RevenueCalculator::new().derive(inputs)`.
pub fn derive(inputs: &CalculatorInputs) -> DerivedMetrics {
    RevenueCalculator::new().derive(inputs)
}
