#![no_main]

use debian_control_lint::{lint, ControlType, Preset};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        for control_type in ControlType::ALL {
            let mut config = Preset::Exact.configuration();
            config.set_control_type(*control_type);
            // Structural errors are fine; panics are not
            let _ = lint(s, &config);
        }
    }
});
