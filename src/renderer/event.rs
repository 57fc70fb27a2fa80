use std::collections::HashMap;

use glam::Vec2;
use winit::event::{MouseButton, VirtualKeyCode};

pub struct InputEvent {
    initial: bool,
}

impl InputEvent {
    pub fn new() -> Self {
        Self { initial: true }
    }

    /// True only the first time it is asked after the input was engaged
    pub fn is_initial_check(&mut self) -> bool {
        if self.initial {
            self.initial = false;
            return true;
        }
        false
    }
}

/// Tracks held keys and mouse buttons and the cursor in world coordinates
pub struct EventManager {
    key_event: HashMap<VirtualKeyCode, InputEvent>,
    mouse_event: HashMap<MouseButton, InputEvent>,
    cursor: Vec2,
}

impl EventManager {
    pub fn new() -> Self {
        Self {
            key_event: HashMap::new(),
            mouse_event: HashMap::new(),
            cursor: Vec2::ZERO,
        }
    }

    /// Key repeat reports held keys again, those keep their original event
    pub fn insert_key(&mut self, vk: VirtualKeyCode) {
        self.key_event.entry(vk).or_insert_with(InputEvent::new);
    }

    pub fn remove_key(&mut self, vk: &VirtualKeyCode) {
        self.key_event.remove(vk);
    }

    pub fn get_key_event_mut(&mut self, vk: &VirtualKeyCode) -> Option<&mut InputEvent> {
        self.key_event.get_mut(vk)
    }

    pub fn insert_mouse_button(&mut self, mb: MouseButton) {
        self.mouse_event.entry(mb).or_insert_with(InputEvent::new);
    }

    pub fn remove_mouse_button(&mut self, mb: &MouseButton) {
        self.mouse_event.remove(mb);
    }

    pub fn contains_mouse_button(&self, mb: &MouseButton) -> bool {
        self.mouse_event.contains_key(mb)
    }

    pub fn set_cursor(&mut self, cursor: Vec2) {
        self.cursor = cursor;
    }

    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }
}
