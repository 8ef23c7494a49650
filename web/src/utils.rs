use chrono::{DateTime, Utc};

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Wall clock as seen by the browser.
pub(crate) fn utc_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

/// Milliseconds from `now` until `due`, rounded up so the deadline has passed when a timer fires.
pub(crate) fn millis_until(due: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    let millis = (due - now).num_milliseconds().saturating_add(1);
    millis.clamp(0, u32::MAX.into()) as u32
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn browser_clock_reads_wall_time() {
        let before = js_sys::Date::now() as i64;
        let now = utc_now();
        let after = js_sys::Date::now() as i64;

        assert!(now.timestamp_millis() >= before);
        assert!(now.timestamp_millis() <= after);
    }

    #[wasm_bindgen_test]
    fn timeout_for_a_browser_deadline_is_bounded() {
        let now = utc_now();
        let due = now + chrono::TimeDelta::milliseconds(1_000);

        assert_eq!(millis_until(due, now), 1_001);
        assert!(millis_until(due, utc_now()) <= 1_001);
    }
}
