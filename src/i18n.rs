// ============================================================================
// LOCALES & LABEL TABLE
// ============================================================================
//
// Every user-visible string on the panels and charts is looked up here by
// Key; renderers never embed display text directly.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Tr,
    #[default]
    En,
}

impl Locale {
    pub fn toggled(self) -> Self {
        match self {
            Locale::Tr => Locale::En,
            Locale::En => Locale::Tr,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Locale::Tr => "tr",
            Locale::En => "en",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    // Panel titles
    MovingMap,
    TacticalSituation,
    Hsi,
    Stores,
    // Chart titles
    FlightEnvelope,
    RcsPolar,
    Capability,
    // Readout labels
    Altitude,
    Speed,
    Mach,
    Heading,
    Course,
    Bearing,
    Range,
    Waypoint,
    Target,
    Fuel,
    Engine,
    Egt,
    Selected,
    GLoad,
    AngleOfAttack,
    VerticalSpeed,
    Pitch,
    Roll,
    Azimuth,
    // Capability axes
    Stealth,
    Payload,
    Agility,
    Sensors,
    // Series legends
    Concept,
    Baseline,
}

impl Key {
    pub const ALL: [Key; 32] = [
        Key::MovingMap,
        Key::TacticalSituation,
        Key::Hsi,
        Key::Stores,
        Key::FlightEnvelope,
        Key::RcsPolar,
        Key::Capability,
        Key::Altitude,
        Key::Speed,
        Key::Mach,
        Key::Heading,
        Key::Course,
        Key::Bearing,
        Key::Range,
        Key::Waypoint,
        Key::Target,
        Key::Fuel,
        Key::Engine,
        Key::Egt,
        Key::Selected,
        Key::GLoad,
        Key::AngleOfAttack,
        Key::VerticalSpeed,
        Key::Pitch,
        Key::Roll,
        Key::Azimuth,
        Key::Stealth,
        Key::Payload,
        Key::Agility,
        Key::Sensors,
        Key::Concept,
        Key::Baseline,
    ];
}

/// Returns the display text for `key` in `locale`.
pub fn text(locale: Locale, key: Key) -> &'static str {
    let (tr, en) = match key {
        Key::MovingMap => ("HAREKETLİ HARİTA", "MOVING MAP"),
        Key::TacticalSituation => ("TAKTİK DURUM", "TACTICAL SITUATION"),
        Key::Hsi => ("YATAY DURUM GÖSTERGESİ", "HSI"),
        Key::Stores => ("MÜHİMMAT", "STORES"),
        Key::FlightEnvelope => ("UÇUŞ ZARFI", "FLIGHT ENVELOPE"),
        Key::RcsPolar => ("RADAR KESİT ALANI", "RADAR CROSS SECTION"),
        Key::Capability => ("YETENEK KARŞILAŞTIRMASI", "CAPABILITY COMPARISON"),
        Key::Altitude => ("İRT", "ALT"),
        Key::Speed => ("HIZ", "SPD"),
        Key::Mach => ("MACH", "MACH"),
        Key::Heading => ("BAŞ", "HDG"),
        Key::Course => ("ROTA", "CRS"),
        Key::Bearing => ("KERTERİZ", "BRG"),
        Key::Range => ("MESAFE", "RNG"),
        Key::Waypoint => ("NOKTA", "WPT"),
        Key::Target => ("HEDEF", "TGT"),
        Key::Fuel => ("YAKIT", "FUEL"),
        Key::Engine => ("MOTOR", "ENG"),
        Key::Egt => ("EGS", "EGT"),
        Key::Selected => ("SEÇİLİ", "SELECTED"),
        Key::GLoad => ("G", "G"),
        Key::AngleOfAttack => ("HÜCUM", "AOA"),
        Key::VerticalSpeed => ("DİKEY", "VS"),
        Key::Pitch => ("YUNUS", "PITCH"),
        Key::Roll => ("YATIŞ", "ROLL"),
        Key::Azimuth => ("ANTEN", "ANT"),
        Key::Stealth => ("GİZLİLİK", "STEALTH"),
        Key::Payload => ("FAYDALI YÜK", "PAYLOAD"),
        Key::Agility => ("MANEVRA", "AGILITY"),
        Key::Sensors => ("SENSÖR", "SENSORS"),
        Key::Concept => ("KONSEPT", "CONCEPT"),
        Key::Baseline => ("4. NESİL", "4TH GEN"),
    };
    match locale {
        Locale::Tr => tr,
        Locale::En => en,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_has_text_in_both_locales() {
        for key in Key::ALL {
            assert!(!text(Locale::Tr, key).is_empty(), "{key:?} missing tr");
            assert!(!text(Locale::En, key).is_empty(), "{key:?} missing en");
        }
    }

    #[test]
    fn toggle_round_trips() {
        assert_eq!(Locale::En.toggled(), Locale::Tr);
        assert_eq!(Locale::En.toggled().toggled(), Locale::En);
        assert_eq!(text(Locale::Tr, Key::Fuel), "YAKIT");
        assert_eq!(text(Locale::En, Key::Fuel), "FUEL");
    }
}
