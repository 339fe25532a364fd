// Fixtures shared across the integration suites; not every suite uses
// every fixture.
#![allow(dead_code)]

use relais::{Event, EventKind, Value};

// ============================================================================
// Event kind tree
// ============================================================================
//
//   AppEvent
//   ├── InputEvent
//   │   └── ClickEvent
//   └── TickEvent

pub static APP: EventKind = EventKind::root("AppEvent");
pub static INPUT: EventKind = EventKind::sub("InputEvent", &APP);
pub static CLICK: EventKind = EventKind::sub("ClickEvent", &INPUT);
pub static TICK: EventKind = EventKind::sub("TickEvent", &APP);

// ============================================================================
// Event types
// ============================================================================

pub struct ClickEvent {
    pub x: i32,
    pub y: i32,
}

impl Event for ClickEvent {
    fn kind(&self) -> &'static EventKind {
        &CLICK
    }

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "x" => Some(Value::new(self.x)),
            "y" => Some(Value::new(self.y)),
            _ => None,
        }
    }
}

pub struct TickEvent {
    pub frame: u64,
}

impl Event for TickEvent {
    fn kind(&self) -> &'static EventKind {
        &TICK
    }

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "frame" => Some(Value::new(self.frame)),
            _ => None,
        }
    }
}
