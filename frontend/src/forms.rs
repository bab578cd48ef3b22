//! Input binders for the Intro, Interests and Settings screens.

use shared::{UserProfile, WalkSettings};

pub const INTERESTS_MIN_CHARS: usize = 10;
pub const INTERESTS_MAX_CHARS: usize = 500;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct IntroForm {
    pub name: String,
    pub age: String,
}

impl IntroForm {
    pub fn parsed_age(&self) -> Option<u32> {
        self.age.trim().parse::<u32>().ok()
    }

    pub fn can_advance(&self) -> bool {
        !self.name.trim().is_empty() && self.parsed_age().is_some()
    }

    /// Writes name and age into the profile. Returns `false`, leaving the
    /// profile untouched, when the form is not complete.
    pub fn commit(&self, profile: &mut UserProfile) -> bool {
        match self.parsed_age() {
            Some(age) if self.can_advance() => {
                profile.name = self.name.trim().to_string();
                profile.age = Some(age);
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct InterestsForm {
    text: String,
}

impl InterestsForm {
    /// Replaces the text, cutting it at `INTERESTS_MAX_CHARS` characters.
    pub fn set_text(&mut self, raw: String) {
        self.text = clamp_chars(raw, INTERESTS_MAX_CHARS);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn can_advance(&self) -> bool {
        self.text.trim().chars().count() >= INTERESTS_MIN_CHARS
    }

    pub fn commit(&self, profile: &mut UserProfile) -> bool {
        if !self.can_advance() {
            return false;
        }
        profile.interests = self.text.trim().to_string();
        true
    }
}

fn clamp_chars(mut text: String, max: usize) -> String {
    if let Some((byte_idx, _)) = text.char_indices().nth(max) {
        text.truncate(byte_idx);
    }
    text
}

/// One change coming from the Settings screen controls.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsInput {
    Duration(String),
    Radius(String),
    PlacesCount(String),
    ReturnToStart(bool),
}

/// Parses a slider value for a whole-number setting. Fractional input is
/// rounded so the stored value follows the thumb.
fn parse_whole(raw: &str) -> Option<u32> {
    let value = raw.trim().parse::<f64>().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(value.round().min(u32::MAX as f64) as u32)
}

/// Commits a settings change into the profile, clamped into the configured
/// range. Unparsable slider values are ignored.
pub fn apply_settings_input(
    profile: &mut UserProfile,
    settings: Option<&WalkSettings>,
    input: SettingsInput,
) {
    match input {
        SettingsInput::Duration(raw) => {
            if let Some(value) = parse_whole(&raw) {
                profile.duration = Some(settings.map_or(value, |s| s.duration.clamp(value)));
            }
        }
        SettingsInput::Radius(raw) => {
            if let Ok(value) = raw.trim().parse::<f64>() {
                if value.is_finite() {
                    profile.radius = Some(settings.map_or(value, |s| s.radius.clamp(value)));
                }
            }
        }
        SettingsInput::PlacesCount(raw) => {
            if let Some(value) = parse_whole(&raw) {
                profile.places_count =
                    Some(settings.map_or(value, |s| s.places_count.clamp(value)));
            }
        }
        SettingsInput::ReturnToStart(checked) => profile.return_to_start = checked,
    }
}
