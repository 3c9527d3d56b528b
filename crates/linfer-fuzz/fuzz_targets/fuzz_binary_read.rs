#![no_main]

use libfuzzer_sys::fuzz_target;

use linfer::LinearClassifier;

fuzz_target!(|data: &[u8]| {
    if let Ok(model) = LinearClassifier::read_binary(data) {
        // The writer's canonical encoding must be a fixed point.
        let mut first = Vec::new();
        model.write_binary(&mut first).unwrap();
        let decoded = LinearClassifier::read_binary(first.as_slice()).unwrap();
        let mut second = Vec::new();
        decoded.write_binary(&mut second).unwrap();
        assert_eq!(first, second);
    }
});
