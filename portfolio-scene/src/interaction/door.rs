use bevy::prelude::*;
use constants::interaction::{HOVER_EASING_FACTOR, HOVER_SCALE, REST_SCALE};
use constants::sections::{SectionKey, SectionSpec};

/// A door standing for one portfolio section.
#[derive(Component, Clone, Copy)]
pub struct Door {
    pub spec: &'static SectionSpec,
}

impl Door {
    pub fn new(spec: &'static SectionSpec) -> Self {
        Self { spec }
    }

    #[cfg(test)]
    pub fn key(&self) -> SectionKey {
        self.spec.key
    }

    /// Selection produced by clicking this door. Hover state is irrelevant,
    /// a tap on a touch screen clicks without ever hovering.
    pub fn on_click(&self) -> SectionSelected {
        SectionSelected { key: self.spec.key }
    }
}

/// The part of a door that grows on hover and takes pointer hits. Handle and
/// label sit beside it on the door and keep their size.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct DoorPanel;

/// Fired once per door click. The only event the scene reports outwards;
/// whoever shows the section content owns the notion of "currently open".
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSelected {
    pub key: SectionKey,
}

/// Pointer activity on a door as reported by the picking layer.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorPointerEvent {
    Enter(Entity),
    Leave(Entity),
    Click(Entity),
}

/// Per-door hover state and the eased scale derived from it.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct DoorInteraction {
    hovered: bool,
    current_scale: Vec2,
    target_scale: Vec2,
}

impl Default for DoorInteraction {
    fn default() -> Self {
        Self {
            hovered: false,
            current_scale: Vec2::splat(REST_SCALE),
            target_scale: Vec2::splat(REST_SCALE),
        }
    }
}

impl DoorInteraction {
    pub fn on_pointer_enter(&mut self) {
        self.hovered = true;
        self.target_scale = Vec2::splat(HOVER_SCALE);
    }

    pub fn on_pointer_leave(&mut self) {
        self.hovered = false;
        self.target_scale = Vec2::splat(REST_SCALE);
    }

    /// Move the current scale a fixed fraction of the way to the target.
    /// Applied once per frame this approaches the target without reaching it.
    pub fn tick(&mut self) {
        self.current_scale = ease_toward(self.current_scale, self.target_scale, HOVER_EASING_FACTOR);
    }

    pub fn hovered(&self) -> bool {
        self.hovered
    }

    pub fn current_scale(&self) -> Vec2 {
        self.current_scale
    }

    #[cfg(test)]
    pub fn target_scale(&self) -> Vec2 {
        self.target_scale
    }
}

fn ease_toward(current: Vec2, target: Vec2, factor: f32) -> Vec2 {
    current + (target - current) * factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::sections::SECTION_CATALOG;

    fn distance_to_target(door: &DoorInteraction) -> f32 {
        door.current_scale().distance(door.target_scale())
    }

    #[test]
    fn hover_sets_enlarged_target_and_leave_restores_it() {
        let mut door = DoorInteraction::default();
        assert!(!door.hovered());
        assert_eq!(door.target_scale(), Vec2::ONE);

        door.on_pointer_enter();
        assert!(door.hovered());
        assert_eq!(door.target_scale(), Vec2::splat(1.1));

        door.on_pointer_leave();
        assert!(!door.hovered());
        assert_eq!(door.target_scale(), Vec2::ONE);
    }

    #[test]
    fn hover_scale_converges_monotonically_from_rest() {
        let mut door = DoorInteraction::default();
        door.on_pointer_enter();

        let mut previous = distance_to_target(&door);
        for _ in 0..60 {
            door.tick();
            let distance = distance_to_target(&door);
            assert!(distance < previous, "{distance} !< {previous}");
            assert!(door.current_scale().x <= 1.1 && door.current_scale().y <= 1.1);
            previous = distance;
        }
        assert!(previous < 1e-3);
    }

    #[test]
    fn leaving_eases_back_to_rest_without_overshoot() {
        let mut door = DoorInteraction::default();
        door.on_pointer_enter();
        for _ in 0..30 {
            door.tick();
        }

        door.on_pointer_leave();
        let mut previous = distance_to_target(&door);
        for _ in 0..60 {
            door.tick();
            let distance = distance_to_target(&door);
            assert!(distance < previous);
            assert!(door.current_scale().x >= 1.0 && door.current_scale().y >= 1.0);
            previous = distance;
        }
        assert!(previous < 1e-3);
    }

    #[test]
    fn single_tick_covers_a_tenth_of_the_gap() {
        let mut door = DoorInteraction::default();
        door.on_pointer_enter();
        door.tick();
        assert!((door.current_scale().x - 1.01).abs() < 1e-6);
        assert!((door.current_scale().y - 1.01).abs() < 1e-6);
    }

    #[test]
    fn click_reports_the_door_key_regardless_of_hover() {
        for spec in SECTION_CATALOG {
            let door = Door::new(spec);
            assert_eq!(door.on_click(), SectionSelected { key: spec.key });
        }
    }
}
