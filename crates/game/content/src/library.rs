//! Every repository over one definitions directory, wired together.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::config::ContentConfig;
use crate::error::Result;
use crate::tables::{
    AreasRepository, ArmourRepository, ClassesRepository, EnemiesRepository, FloorsRepository,
    ItemsRepository, KnowledgeRepository, KnowledgeRulesRepository, LocationsRepository,
    LootTablesRepository, PartyMembersRepository, QuestsRepository, ShopsRepository,
    SkillsRepository, StoryRepository, SummonsRepository, WeaponsRepository,
};

/// The full set of content repositories.
///
/// Dependencies are shared, not duplicated: the weapons repository checked by
/// classes is the same instance the library exposes, so each file is read at
/// most once per library.
///
/// # Directory Structure
///
/// ```text
/// definitions/
/// ├── weapons.json, armour.json, items.json, skills.json, summons.json
/// ├── enemies.json, classes.json, party_members.json
/// ├── areas.json, floors.json, locations.json
/// ├── quests.json, shops.json, loot_tables.json
/// ├── knowledge.json, knowledge_rules.json
/// └── story/
///     ├── index.json
///     └── chapters/*.json
/// ```
#[derive(Debug)]
pub struct ContentLibrary {
    definitions_dir: PathBuf,
    weapons: Arc<WeaponsRepository>,
    armour: Arc<ArmourRepository>,
    items: Arc<ItemsRepository>,
    skills: SkillsRepository,
    summons: Arc<SummonsRepository>,
    enemies: EnemiesRepository,
    classes: ClassesRepository,
    party_members: PartyMembersRepository,
    story: Arc<StoryRepository>,
    areas: AreasRepository,
    floors: Arc<FloorsRepository>,
    locations: Arc<LocationsRepository>,
    quests: QuestsRepository,
    shops: ShopsRepository,
    loot_tables: LootTablesRepository,
    knowledge: KnowledgeRepository,
    knowledge_rules: KnowledgeRulesRepository,
}

impl ContentLibrary {
    /// Constructs every repository. Nothing is read until first access.
    pub fn open(definitions_dir: impl Into<PathBuf>) -> Self {
        let dir = definitions_dir.into();

        let weapons = Arc::new(WeaponsRepository::new(&dir));
        let armour = Arc::new(ArmourRepository::new(&dir));
        let items = Arc::new(ItemsRepository::new(&dir));
        let summons = Arc::new(SummonsRepository::new(&dir));
        let story = Arc::new(StoryRepository::new(&dir));
        let floors = Arc::new(FloorsRepository::new(&dir));
        let locations = Arc::new(LocationsRepository::new(&dir, Arc::clone(&floors)));

        Self {
            skills: SkillsRepository::new(&dir),
            enemies: EnemiesRepository::new(&dir, Arc::clone(&weapons), Arc::clone(&armour)),
            classes: ClassesRepository::new(
                &dir,
                Arc::clone(&weapons),
                Arc::clone(&armour),
                Arc::clone(&summons),
            ),
            party_members: PartyMembersRepository::new(
                &dir,
                Arc::clone(&weapons),
                Arc::clone(&armour),
            ),
            areas: AreasRepository::new(&dir),
            quests: QuestsRepository::new(
                &dir,
                Arc::clone(&items),
                Arc::clone(&locations),
                Arc::clone(&story),
            ),
            shops: ShopsRepository::new(
                &dir,
                Arc::clone(&items),
                Arc::clone(&weapons),
                Arc::clone(&armour),
            ),
            loot_tables: LootTablesRepository::new(&dir, Arc::clone(&items)),
            knowledge: KnowledgeRepository::new(&dir),
            knowledge_rules: KnowledgeRulesRepository::new(&dir),
            weapons,
            armour,
            items,
            summons,
            story,
            floors,
            locations,
            definitions_dir: dir,
        }
    }

    /// Opens the directory `config` resolves to.
    pub fn from_config(config: &ContentConfig) -> Self {
        Self::open(config.resolve_dir())
    }

    pub fn definitions_dir(&self) -> &Path {
        &self.definitions_dir
    }

    pub fn weapons(&self) -> &WeaponsRepository {
        &self.weapons
    }

    pub fn armour(&self) -> &ArmourRepository {
        &self.armour
    }

    pub fn items(&self) -> &ItemsRepository {
        &self.items
    }

    pub fn skills(&self) -> &SkillsRepository {
        &self.skills
    }

    pub fn summons(&self) -> &SummonsRepository {
        &self.summons
    }

    pub fn enemies(&self) -> &EnemiesRepository {
        &self.enemies
    }

    pub fn classes(&self) -> &ClassesRepository {
        &self.classes
    }

    pub fn party_members(&self) -> &PartyMembersRepository {
        &self.party_members
    }

    pub fn story(&self) -> &StoryRepository {
        &self.story
    }

    pub fn areas(&self) -> &AreasRepository {
        &self.areas
    }

    pub fn floors(&self) -> &FloorsRepository {
        &self.floors
    }

    pub fn locations(&self) -> &LocationsRepository {
        &self.locations
    }

    pub fn quests(&self) -> &QuestsRepository {
        &self.quests
    }

    pub fn shops(&self) -> &ShopsRepository {
        &self.shops
    }

    pub fn loot_tables(&self) -> &LootTablesRepository {
        &self.loot_tables
    }

    pub fn knowledge(&self) -> &KnowledgeRepository {
        &self.knowledge
    }

    pub fn knowledge_rules(&self) -> &KnowledgeRulesRepository {
        &self.knowledge_rules
    }

    /// Loads every repository, leaves first, and stops at the first failure.
    pub fn validate_all(&self) -> Result<ContentSummary> {
        let mut summary = ContentSummary::default();
        summary.record("weapon", self.weapons.len()?);
        summary.record("armour", self.armour.len()?);
        summary.record("item", self.items.len()?);
        summary.record("skill", self.skills.len()?);
        summary.record("summon", self.summons.len()?);
        summary.record("enemy", self.enemies.all()?.len());
        summary.record("enemy group", self.enemies.groups()?.len());
        summary.record("class", self.classes.len()?);
        summary.record("party member", self.party_members.len()?);
        summary.record("story node", self.story.len()?);
        summary.record("area", self.areas.len()?);
        summary.record("floor", self.floors.len()?);
        summary.record("location", self.locations.len()?);
        summary.record("quest", self.quests.len()?);
        summary.record("shop", self.shops.len()?);
        summary.record("loot table", self.loot_tables.len()?);
        summary.record("knowledge", self.knowledge.len()?);
        self.knowledge_rules.rules()?;
        summary.record("knowledge rules", 1);

        info!(
            "Validated {} definitions from {}",
            summary.total(),
            self.definitions_dir.display()
        );
        Ok(summary)
    }
}

/// Per-kind record counts from a successful [`ContentLibrary::validate_all`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentSummary {
    counts: Vec<(&'static str, usize)>,
}

impl ContentSummary {
    fn record(&mut self, kind: &'static str, count: usize) {
        self.counts.push((kind, count));
    }

    pub fn count(&self, kind: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|(recorded, _)| *recorded == kind)
            .map(|(_, count)| *count)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    /// Kinds in validation order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.counts.iter().copied()
    }
}

impl fmt::Display for ContentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (kind, count) in &self.counts {
            writeln!(f, "{kind:>16}: {count}")?;
        }
        write!(f, "{:>16}: {}", "total", self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn open_reads_nothing() {
        let library = ContentLibrary::open("/nonexistent/definitions");
        assert_eq!(library.definitions_dir(), Path::new("/nonexistent/definitions"));
        assert!(!library.weapons().is_loaded());
        assert!(!library.quests().is_loaded());
        assert_eq!(
            library.classes().file_path(),
            Path::new("/nonexistent/definitions/classes.json")
        );
    }

    #[test]
    fn from_config_uses_override() {
        let config = ContentConfig::default().with_definitions_dir("/srv/game/defs");
        let library = ContentLibrary::from_config(&config);
        assert_eq!(library.definitions_dir(), Path::new("/srv/game/defs"));
    }

    #[test]
    fn validate_all_fails_on_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContentLibrary::open(dir.path().join("missing"))
            .validate_all()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Load);
        assert!(err.to_string().contains("weapons.json"));
    }

    #[test]
    fn summary_counts_and_display() {
        let mut summary = ContentSummary::default();
        summary.record("weapon", 3);
        summary.record("item", 2);
        assert_eq!(summary.count("weapon"), Some(3));
        assert_eq!(summary.count("quest"), None);
        assert_eq!(summary.total(), 5);
        assert!(summary.to_string().ends_with("total: 5"));
    }
}
