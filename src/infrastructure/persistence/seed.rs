//! Startup seeding of reference data
//!
//! Fills the lookup tables: schools of magic, damage types, coin
//! denominations, abilities, and skills keyed to their default ability.
//! Runs only when the ability table is empty, so restarting the server
//! never duplicates rows.

use anyhow::{Context, Result};

use super::SqliteRepository;

const SCHOOLS_OF_MAGIC: &[&str] = &[
    "Abjuration",
    "Divination",
    "Enchantment",
    "Evocation",
    "Illusion",
    "Necromancy",
    "Transmutation",
];

const DAMAGE_TYPES: &[&str] = &[
    "Acid",
    "Bludgeoning",
    "Cold",
    "Fire",
    "Force",
    "Lightning",
    "Necrotic",
    "Piercing",
    "Poison",
    "Psychic",
    "Radiant",
    "Slashing",
    "Thunder",
];

const COIN_TYPES: &[(&str, &str, i64)] = &[
    ("Copper", "cp", 1),
    ("Silver", "sp", 10),
    ("Electrum", "ep", 50),
    ("Gold", "gp", 100),
    ("Platinum", "pp", 1000),
];

const ABILITIES: &[(&str, &str)] = &[
    ("Strength", "STR"),
    ("Dexterity", "DEX"),
    ("Constitution", "CON"),
    ("Intelligence", "INT"),
    ("Wisdom", "WIS"),
    ("Charisma", "CHA"),
];

const SKILLS: &[(&str, &str)] = &[
    ("Athletics", "STR"),
    ("Acrobatics", "DEX"),
    ("Sleight of Hand", "DEX"),
    ("Stealth", "DEX"),
    ("Arcana", "INT"),
    ("History", "INT"),
    ("Investigation", "INT"),
    ("Nature", "INT"),
    ("Religion", "INT"),
    ("Animal Handling", "WIS"),
    ("Insight", "WIS"),
    ("Medicine", "WIS"),
    ("Perception", "WIS"),
    ("Survival", "WIS"),
    ("Deception", "CHA"),
    ("Intimidation", "CHA"),
    ("Performance", "CHA"),
    ("Persuasion", "CHA"),
];

/// Seed the reference tables if they are empty
pub async fn seed_reference_data(repository: &SqliteRepository) -> Result<()> {
    let reference = repository.reference();

    if reference.count_abilities().await? > 0 {
        tracing::debug!("Reference data already present, skipping seed");
        return Ok(());
    }

    tracing::info!("Seeding reference data");

    for name in SCHOOLS_OF_MAGIC {
        reference.create_school(name).await?;
    }
    for name in DAMAGE_TYPES {
        reference.create_damage_type(name).await?;
    }
    for (name, abbreviation, value) in COIN_TYPES {
        reference.create_coin_type(name, abbreviation, *value).await?;
    }
    for (name, abbreviation) in ABILITIES {
        reference.create_ability(name, abbreviation).await?;
    }
    for (name, default_ability) in SKILLS {
        let ability = reference
            .get_ability_by_abbreviation(default_ability)
            .await?
            .with_context(|| format!("Seed ability missing: {}", default_ability))?;
        reference.create_skill(name, ability.id).await?;
    }

    tracing::info!(
        schools = SCHOOLS_OF_MAGIC.len(),
        damage_types = DAMAGE_TYPES.len(),
        coin_types = COIN_TYPES.len(),
        abilities = ABILITIES.len(),
        skills = SKILLS.len(),
        "Reference data seeded"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_populates_reference_tables() {
        let repository = SqliteRepository::in_memory().await.unwrap();
        seed_reference_data(&repository).await.unwrap();

        let reference = repository.reference();
        assert_eq!(reference.list_schools().await.unwrap().len(), 7);
        assert_eq!(reference.list_damage_types().await.unwrap().len(), 13);
        assert_eq!(reference.list_coin_types().await.unwrap().len(), 5);
        assert_eq!(reference.list_abilities().await.unwrap().len(), 6);
        assert_eq!(reference.list_skills().await.unwrap().len(), 18);
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let repository = SqliteRepository::in_memory().await.unwrap();
        seed_reference_data(&repository).await.unwrap();
        seed_reference_data(&repository).await.unwrap();

        let reference = repository.reference();
        assert_eq!(reference.list_abilities().await.unwrap().len(), 6);
        assert_eq!(reference.list_skills().await.unwrap().len(), 18);
    }

    #[tokio::test]
    async fn test_seeded_skills_point_at_their_ability() {
        let repository = SqliteRepository::in_memory().await.unwrap();
        seed_reference_data(&repository).await.unwrap();

        let reference = repository.reference();
        let dex = reference
            .get_ability_by_abbreviation("DEX")
            .await
            .unwrap()
            .unwrap();
        let skills = reference.list_skills().await.unwrap();
        let stealth = skills.iter().find(|s| s.name == "Stealth").unwrap();
        assert_eq!(stealth.default_ability_id, dex.id);
    }
}
