//! ConversionEngine unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use converter_types::{CurrencyCode, RateProvider, StaticRates};
    use proptest::prelude::*;

    use crate::{Completion, ConversionEngine, ConverterInput};

    const EPSILON: f64 = 1e-9;

    /// Minimal table: USD and BRL only, everything else at par.
    pub struct TwoCurrencyRates;

    impl RateProvider for TwoCurrencyRates {
        fn rate_of(&self, code: CurrencyCode) -> f64 {
            match code {
                CurrencyCode::BRL => 5.45,
                _ => 1.0,
            }
        }
    }

    fn engine() -> ConversionEngine<StaticRates> {
        ConversionEngine::new(StaticRates)
    }

    fn any_currency() -> impl Strategy<Value = CurrencyCode> {
        prop::sample::select(CurrencyCode::all().to_vec())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Recomputation protocol
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_initial_state() {
        let engine = engine();
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.amount, 1.0);
        assert_eq!(snapshot.source, CurrencyCode::USD);
        assert_eq!(snapshot.target, CurrencyCode::BRL);
        assert_eq!(snapshot.result, 0.0);
        assert!(!snapshot.pending);
    }

    #[test]
    fn test_setter_marks_pending_until_delivery() {
        let mut engine = engine();
        let pending = engine.set_amount(2.0);
        assert!(engine.state().is_pending());
        assert_eq!(engine.state().result(), 0.0);

        assert_eq!(engine.complete(&pending), Completion::Applied);
        assert!(!engine.state().is_pending());
        assert!((engine.state().result() - 10.9).abs() < EPSILON);
    }

    #[test]
    fn test_every_setter_issues_new_request() {
        let mut engine = engine();
        let ids = [
            engine.set_amount(3.0).id(),
            engine.set_amount_input("4").id(),
            engine.set_source_currency(CurrencyCode::EUR).id(),
            engine.set_target_currency(CurrencyCode::JPY).id(),
            engine.swap().id(),
            engine.refresh().id(),
        ];
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(engine.state().latest_request_id(), ids[5]);
    }

    #[test]
    fn test_apply_dispatches_inputs() {
        let mut engine = engine();
        engine.apply(ConverterInput::Source(CurrencyCode::GBP));
        engine.apply(ConverterInput::Target(CurrencyCode::CHF));
        engine.apply(ConverterInput::AmountText("12.5".into()));
        let pending = engine.apply(ConverterInput::Swap);

        assert_eq!(pending.request.source, CurrencyCode::CHF);
        assert_eq!(pending.request.target, CurrencyCode::GBP);
        assert_eq!(pending.request.amount, 12.5);
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Staleness
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_stale_delivery_after_fresh_is_discarded() {
        let mut engine = engine();
        let r1 = engine.set_amount(1.0);
        let r2 = engine.set_amount(2.0);

        assert_eq!(engine.complete(&r2), Completion::Applied);
        assert_eq!(engine.complete(&r1), Completion::Stale);
        assert!((engine.state().result() - r2.candidate).abs() < EPSILON);
        assert!(!engine.state().is_pending());
    }

    #[test]
    fn test_stale_delivery_before_fresh_keeps_pending() {
        let mut engine = engine();
        let r1 = engine.set_amount(1.0);
        let r2 = engine.set_target_currency(CurrencyCode::EUR);

        assert_eq!(engine.complete(&r1), Completion::Stale);
        assert!(engine.state().is_pending());
        assert_eq!(engine.state().result(), 0.0);

        assert_eq!(engine.complete(&r2), Completion::Applied);
        assert!((engine.state().result() - 0.92).abs() < EPSILON);
    }

    #[test]
    fn test_duplicate_delivery_is_harmless() {
        let mut engine = engine();
        let r1 = engine.set_amount(5.0);
        assert_eq!(engine.complete(&r1), Completion::Applied);
        assert_eq!(engine.complete(&r1), Completion::Applied);
        assert!((engine.state().result() - 27.25).abs() < EPSILON);
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Normalization
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_invalid_numbers_become_zero() {
        let mut engine = engine();
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1.0] {
            let pending = engine.set_amount(value);
            assert_eq!(pending.request.amount, 0.0);
            assert_eq!(pending.candidate, 0.0);
        }
    }

    #[test]
    fn test_malformed_text_becomes_zero() {
        let mut engine = engine();
        for text in ["", "abc", "1,5", "--2"] {
            let pending = engine.set_amount_input(text);
            assert_eq!(engine.state().amount(), 0.0, "input {:?}", text);
            engine.complete(&pending);
            assert_eq!(engine.state().result(), 0.0);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Swap & unit rate
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_swap_is_involutive() {
        let mut engine = engine();
        engine.set_source_currency(CurrencyCode::AOA);
        engine.set_target_currency(CurrencyCode::NAD);
        engine.swap();
        assert_eq!(engine.state().source(), CurrencyCode::NAD);
        assert_eq!(engine.state().target(), CurrencyCode::AOA);
        engine.swap();
        assert_eq!(engine.state().source(), CurrencyCode::AOA);
        assert_eq!(engine.state().target(), CurrencyCode::NAD);
    }

    #[test]
    fn test_unit_rate_ignores_amount_and_pending() {
        let mut engine = engine();
        let before = engine.unit_rate();
        let pending = engine.set_amount(1234.0);
        assert!(engine.state().is_pending());
        assert_eq!(engine.unit_rate(), before);
        engine.complete(&pending);
        assert_eq!(engine.unit_rate(), before);
        assert_eq!(engine.snapshot().unit_rate, 5.45);
    }

    #[test]
    fn test_brl_usd_scenario() {
        let mut engine = ConversionEngine::new(TwoCurrencyRates);

        let pending = engine.refresh();
        engine.complete(&pending);
        assert!((engine.state().result() - 5.45).abs() < EPSILON);

        let pending = engine.swap();
        assert_eq!(engine.state().source(), CurrencyCode::BRL);
        assert_eq!(engine.state().target(), CurrencyCode::USD);
        engine.complete(&pending);
        assert!((engine.state().result() - 0.1835).abs() < 1e-4);

        let pending = engine.set_amount_input("not a number");
        engine.complete(&pending);
        assert_eq!(engine.state().amount(), 0.0);
        assert_eq!(engine.state().result(), 0.0);
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Properties
    // ─────────────────────────────────────────────────────────────────────────────

    proptest! {
        #[test]
        fn identity_conversion(amount in 0.0f64..1e12, code in any_currency()) {
            let mut engine = engine();
            engine.set_source_currency(code);
            engine.set_target_currency(code);
            let pending = engine.set_amount(amount);
            engine.complete(&pending);
            prop_assert_eq!(engine.state().result(), amount);
        }

        #[test]
        fn round_trip_through_swap(
            amount in 0.01f64..1e9,
            from in any_currency(),
            to in any_currency(),
        ) {
            let mut engine = engine();
            engine.set_source_currency(from);
            engine.set_target_currency(to);
            let there = engine.set_amount(amount);
            engine.complete(&there);

            engine.swap();
            let back = engine.set_amount(engine.state().result());
            engine.complete(&back);

            prop_assert!(((engine.state().result() - amount) / amount).abs() < EPSILON);
        }

        #[test]
        fn only_latest_of_many_requests_lands(
            amounts in prop::collection::vec(0.0f64..1e6, 2..20),
            order in any::<u64>(),
        ) {
            let mut engine = engine();
            let mut issued: Vec<_> = amounts.iter().map(|&a| engine.set_amount(a)).collect();
            let latest = *issued.last().unwrap();

            // deterministic shuffle of delivery order
            let len = issued.len();
            for i in 0..len {
                let j = ((order >> (i % 64)) as usize + i * 7) % len;
                issued.swap(i, j);
            }
            for pending in &issued {
                engine.complete(pending);
            }

            prop_assert_eq!(engine.state().result(), latest.candidate);
            prop_assert!(!engine.state().is_pending());
        }
    }
}
