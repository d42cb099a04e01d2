//! World layout: areas, floors and the locations that make up each floor.

/// A directed edge between two areas.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaConnectionDef {
    pub to: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaDef {
    pub id: String,
    pub name: String,
    pub description: String,
    /// At least one tag; all lowercase.
    pub tags: Vec<String>,
    pub connections: Vec<AreaConnectionDef>,
    pub entry_story_node_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloorDef {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub starting_location_id: String,
    pub boss_location_id: Option<String>,
    pub next_floor_id: Option<String>,
    pub notes: Option<String>,
}

impl FloorDef {
    pub fn is_last(&self) -> bool {
        self.next_floor_id.is_none()
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum LocationType {
    Town,
    Open,
    Side,
    Story,
    Secret,
    Boss,
    Gate,
}

impl LocationType {
    pub const NAMES: [&'static str; 7] =
        ["town", "open", "side", "story", "secret", "boss", "gate"];
}

/// An exit from a location plus the story and quest conditions that show,
/// hide or annotate it. Conditions are evaluated by the navigation layer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationConnectionDef {
    pub to: String,
    pub label: String,
    pub progresses_story: bool,
    pub requires_quest_active: Option<String>,
    pub hide_if_quest_completed: Option<String>,
    pub hide_if_quest_turned_in: Option<String>,
    pub show_if_flag_true: Option<String>,
    pub hide_if_flag_true: Option<String>,
}

impl LocationConnectionDef {
    /// True when no quest or flag condition is attached.
    pub fn is_unconditional(&self) -> bool {
        self.requires_quest_active.is_none()
            && self.hide_if_quest_completed.is_none()
            && self.hide_if_quest_turned_in.is_none()
            && self.show_if_flag_true.is_none()
            && self.hide_if_flag_true.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpcPresenceDef {
    pub npc_id: String,
    pub talk_node_id: Option<String>,
    pub quest_hub_node_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationDef {
    pub id: String,
    pub name: String,
    pub description: String,
    pub floor_id: String,
    pub location_type: LocationType,
    pub area_level: Option<u32>,
    pub tags: Vec<String>,
    pub connections: Vec<LocationConnectionDef>,
    pub entry_story_node_id: Option<String>,
    pub entry_story_repeatable: bool,
    pub npcs_present: Vec<NpcPresenceDef>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn location_type_names_match_variants() {
        let parsed: Vec<String> = LocationType::iter().map(|t| t.to_string()).collect();
        assert_eq!(parsed, LocationType::NAMES);
        assert!("dungeon".parse::<LocationType>().is_err());
    }

    #[test]
    fn connection_without_gates_is_unconditional() {
        let mut conn = LocationConnectionDef {
            to: "square".into(),
            label: "Back to the square".into(),
            ..Default::default()
        };
        assert!(conn.is_unconditional());

        conn.show_if_flag_true = Some("gate_opened".into());
        assert!(!conn.is_unconditional());
    }
}
