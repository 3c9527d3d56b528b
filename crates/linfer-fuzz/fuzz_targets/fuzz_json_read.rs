#![no_main]

use libfuzzer_sys::fuzz_target;

use linfer::LinearClassifier;

fuzz_target!(|data: &[u8]| {
    if let Ok(model) = LinearClassifier::read_json(data) {
        let _ = model.predict(&[]);
    }
});
