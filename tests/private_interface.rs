//! A private interface whose crate only uses part of the generated API

#![deny(dead_code)]

use polyface::interface;

interface! {
    interface Gauge {
        conformance GaugeImpl;
        table GaugeTable;

        fn read(&self) -> i32;
    }
}

struct Fixed(i32);

impl GaugeImpl for Fixed {
    fn read(&self) -> i32 {
        self.0
    }
}

#[test]
fn test_private_interface_uses_one_strategy() {
    let gauge = Gauge::bound(Fixed(-4));
    assert_eq!(gauge.read(), -4);
}
