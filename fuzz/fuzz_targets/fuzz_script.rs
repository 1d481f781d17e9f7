#![no_main]

use libfuzzer_sys::fuzz_target;
use standoff::{Action, Script};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Command-line parsing must not panic, and accepted lines must print back
    // to something that parses to the same action.
    for line in text.lines() {
        if let Ok(action) = line.parse::<Action>() {
            assert_eq!(action.to_string().parse::<Action>(), Ok(action));
        }
    }

    // JSON scripts either fail to parse or replay without panicking.
    if let Ok(script) = Script::from_json(text) {
        let _ = script.replay();
    }
});
