//! Property tests for return sequences and signature matching.

use allows::{Call, Mock, Value, allow, call, receive_method};
use proptest::prelude::*;

proptest! {
    /// `and_return(v1..vn)` yields v1..vn, then vn forever.
    #[test]
    fn return_sequence_repeats_last_value(
        values in prop::collection::vec(any::<i64>(), 1..8),
        extra in 0usize..8,
    ) {
        let mock = Mock::new();
        allow(&mock)
            .to(receive_method("next").and_return(values.clone()))
            .unwrap();

        let last = *values.last().unwrap();
        let expected = values.iter().copied().chain(std::iter::repeat_n(last, extra));
        for want in expected {
            prop_assert_eq!(mock.call_method("next", &call!()).unwrap(), Value::from(want));
        }
    }

    /// A registered signature matches itself and nothing with an extra argument.
    #[test]
    fn signature_matches_exactly(
        args in prop::collection::vec(any::<i32>(), 0..4),
        key in "[a-z]{1,6}",
    ) {
        let signature = Call::from_parts(args, [(key, true)]);
        let mock = Mock::new();
        allow(&mock)
            .to(receive_method("m")
                .called_with(signature.clone())
                .and_then(|e| e.and_return_value("hit")))
            .unwrap();

        prop_assert_eq!(mock.call_method("m", &signature).unwrap(), Value::from("hit"));

        let extended = signature.arg(0);
        prop_assert!(mock.call_method("m", &extended).unwrap_err().is_unmatched());
    }
}
