//! Compiled-in reference content.
//!
//! A small but complete catalog used by the CLI when no content file is
//! given, by benchmarks, and as a realistic fixture in tests.

use super::modifiers::TURN_LIMIT_CHANGE;
use super::{
    BattleModifier, Biome, ContentTables, Era, MapPreset, ModifierEffect, ModifierKind,
    ObjectiveType, RatEntry, ScenarioTemplate, UnitTable, UnitType,
};

impl ContentTables {
    /// The built-in reference catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            unit_tables: builtin_unit_tables(),
            templates: builtin_templates(),
            map_presets: builtin_map_presets(),
            modifiers: builtin_modifiers(),
        }
    }
}

fn mech(chassis: &str, variant: &str, bv: u32, tonnage: u32) -> RatEntry {
    RatEntry::new(chassis, variant, bv, tonnage, UnitType::BattleMech)
}

fn vehicle(chassis: &str, variant: &str, bv: u32, tonnage: u32) -> RatEntry {
    RatEntry::new(chassis, variant, bv, tonnage, UnitType::Vehicle)
}

fn infantry(chassis: &str, variant: &str, bv: u32) -> RatEntry {
    RatEntry::new(chassis, variant, bv, 0, UnitType::Infantry)
}

fn battle_armor(chassis: &str, variant: &str, bv: u32, tonnage: u32) -> RatEntry {
    RatEntry::new(chassis, variant, bv, tonnage, UnitType::BattleArmor)
}

fn pirate_entries() -> Vec<RatEntry> {
    vec![
        mech("Locust", "LCT-1V", 432, 20).with_weight(3.0),
        mech("Wasp", "WSP-1A", 384, 20).with_weight(2.0),
        mech("Commando", "COM-2D", 541, 25).with_weight(2.0),
        mech("Jenner", "JR7-D", 875, 35),
        mech("Phoenix Hawk", "PXH-1", 1041, 45).with_weight(2.0),
        mech("Shadow Hawk", "SHD-2H", 1064, 55).with_weight(2.0),
        mech("Wolverine", "WVR-6R", 1101, 55),
        mech("Griffin", "GRF-1N", 1272, 55),
        mech("Rifleman", "RFL-3N", 1039, 60),
        mech("Catapult", "CPLT-C1", 1399, 65),
        mech("Warhammer", "WHM-6R", 1299, 70),
        mech("Marauder", "MAD-3R", 1363, 75),
        vehicle("Scorpion Light Tank", "Standard", 291, 25).with_weight(3.0),
        vehicle("Galleon Light Tank", "GAL-100", 323, 30).with_weight(2.0),
        vehicle("Vedette Medium Tank", "Standard", 371, 50).with_weight(2.0),
        vehicle("Condor Heavy Hover Tank", "Standard", 516, 50),
        vehicle("Manticore Heavy Tank", "Standard", 815, 60),
        infantry("Foot Platoon", "Rifle", 84).with_weight(2.0),
        infantry("Jump Platoon", "Laser", 131),
    ]
}

fn federated_suns_entries() -> Vec<RatEntry> {
    vec![
        mech("Valkyrie", "VLK-QA", 723, 30).with_weight(2.0),
        mech("Commando", "COM-2D", 541, 25),
        mech("Hatchetman", "HCT-3F", 1007, 45),
        mech("Centurion", "CN9-A", 945, 50).with_weight(2.0),
        mech("Enforcer", "ENF-4R", 1032, 50).with_weight(2.0),
        mech("Hunchback", "HBK-4G", 1041, 50),
        mech("JagerMech", "JM6-S", 901, 65),
        mech("Zeus", "ZEU-6S", 1348, 80),
        mech("Awesome", "AWS-8Q", 1605, 80),
        mech("BattleMaster", "BLR-1G", 1519, 85),
        mech("Atlas", "AS7-D", 1897, 100),
        vehicle("Pegasus Scout Hover Tank", "Standard", 466, 35).with_weight(2.0),
        vehicle("Vedette Medium Tank", "Standard", 371, 50),
        vehicle("Bulldog Medium Tank", "Standard", 524, 60),
        vehicle("Manticore Heavy Tank", "Standard", 815, 60).with_weight(2.0),
        vehicle("Schrek PPC Carrier", "Standard", 904, 80),
        infantry("Foot Platoon", "Rifle", 84),
        infantry("Jump Platoon", "Laser", 131),
    ]
}

fn clan_wolf_entries() -> Vec<RatEntry> {
    vec![
        mech("Mist Lynx", "Prime", 1172, 25),
        mech("Kit Fox", "Prime", 1264, 30),
        mech("Adder", "Prime", 1566, 35),
        mech("Nova", "Prime", 1947, 50),
        mech("Stormcrow", "Prime", 1918, 55).with_weight(2.0),
        mech("Mad Dog", "Prime", 1798, 60).with_weight(2.0),
        mech("Hellbringer", "Prime", 1805, 65),
        mech("Summoner", "Prime", 1932, 70).with_weight(2.0),
        mech("Timber Wolf", "Prime", 2737, 75).with_weight(2.0),
        mech("Gargoyle", "Prime", 2188, 80),
        mech("Warhawk", "Prime", 2650, 85),
        mech("Dire Wolf", "Prime", 2712, 100),
        vehicle("Zorya Light Tank", "Standard", 729, 30),
        vehicle("Hachiman Fire Support Tank", "Standard", 1120, 50),
        battle_armor("Elemental", "Point", 447, 5).with_weight(3.0),
    ]
}

fn builtin_unit_tables() -> Vec<UnitTable> {
    vec![
        UnitTable {
            faction: "Pirates".to_string(),
            era: Era::ClanInvasion,
            entries: pirate_entries(),
        },
        UnitTable {
            faction: "Pirates".to_string(),
            era: Era::SuccessionWars,
            entries: pirate_entries()
                .into_iter()
                .filter(|e| e.chassis != "Condor Heavy Hover Tank")
                .collect(),
        },
        UnitTable {
            faction: "Federated Suns".to_string(),
            era: Era::ClanInvasion,
            entries: federated_suns_entries(),
        },
        UnitTable {
            faction: "Federated Suns".to_string(),
            era: Era::SuccessionWars,
            entries: federated_suns_entries(),
        },
        UnitTable {
            faction: "Clan Wolf".to_string(),
            era: Era::ClanInvasion,
            entries: clan_wolf_entries(),
        },
    ]
}

fn template(
    id: &str,
    name: &str,
    objective_type: ObjectiveType,
    victory: &[&str],
    turn_limit: u32,
    biomes: &[Biome],
    units: (u32, u32),
    multiplier: f64,
) -> ScenarioTemplate {
    ScenarioTemplate {
        id: id.to_string(),
        name: name.to_string(),
        objective_type,
        victory_conditions: victory.iter().map(|v| (*v).to_string()).collect(),
        turn_limit,
        suggested_biomes: biomes.to_vec(),
        min_player_units: units.0,
        max_player_units: units.1,
        default_opfor_multiplier: multiplier,
    }
}

fn builtin_templates() -> Vec<ScenarioTemplate> {
    vec![
        template(
            "standup-fight",
            "Standup Fight",
            ObjectiveType::Destroy,
            &["Destroy or rout all enemy units"],
            12,
            &[Biome::Temperate, Biome::Desert, Biome::Arctic],
            (1, 0),
            1.0,
        ),
        template(
            "base-assault",
            "Base Assault",
            ObjectiveType::Capture,
            &[
                "Control the enemy command post at the end of the game",
                "Preserve at least half of your force",
            ],
            15,
            &[Biome::Urban, Biome::Temperate],
            (2, 8),
            1.0,
        ),
        template(
            "hold-the-line",
            "Hold the Line",
            ObjectiveType::Defend,
            &["Keep at least one unit within the defense zone until the turn limit"],
            10,
            &[Biome::Urban, Biome::Jungle, Biome::Temperate],
            (5, 0),
            1.25,
        ),
        template(
            "breakthrough",
            "Breakthrough",
            ObjectiveType::Breakthrough,
            &["Exit half of your force through the opposing map edge"],
            10,
            &[Biome::Desert, Biome::Temperate],
            (1, 6),
            1.0,
        ),
        template(
            "recon-in-force",
            "Recon in Force",
            ObjectiveType::Recon,
            &["Scan three of the five marked objectives", "Withdraw scanning units"],
            8,
            &[Biome::Jungle, Biome::Swamp],
            (1, 3),
            0.75,
        ),
        template(
            "convoy-escort",
            "Convoy Escort",
            ObjectiveType::Escort,
            &["Bring at least three convoy vehicles off the far edge"],
            14,
            &[Biome::Desert, Biome::Temperate, Biome::Arctic],
            (3, 8),
            1.0,
        ),
        template(
            "war-of-attrition",
            "War of Attrition",
            ObjectiveType::Destroy,
            &["Destroy more BV than you lose"],
            0,
            &[Biome::Volcanic, Biome::Lunar],
            (6, 0),
            1.1,
        ),
    ]
}

fn builtin_map_presets() -> Vec<MapPreset> {
    vec![
        MapPreset::new("temperate-rolling-hills", "Rolling Hills", Biome::Temperate, 12),
        MapPreset::new("temperate-river-valley", "River Valley", Biome::Temperate, 15),
        MapPreset::new("temperate-forest-edge", "Forest Edge", Biome::Temperate, 10),
        MapPreset::new("urban-city-center", "City Center", Biome::Urban, 12),
        MapPreset::new("urban-industrial", "Industrial District", Biome::Urban, 14),
        MapPreset::new("desert-dunes", "Shifting Dunes", Biome::Desert, 16),
        MapPreset::new("desert-canyon", "Red Canyon", Biome::Desert, 12),
        MapPreset::new("arctic-tundra", "Frozen Tundra", Biome::Arctic, 14),
        MapPreset::new("jungle-ruins", "Overgrown Ruins", Biome::Jungle, 10),
        MapPreset::new("swamp-delta", "River Delta", Biome::Swamp, 12),
        MapPreset::new("volcanic-caldera", "Caldera", Biome::Volcanic, 11),
    ]
}

fn builtin_modifiers() -> Vec<BattleModifier> {
    use ModifierEffect::{Negative, Neutral, Positive};
    use ModifierKind::{
        EnvironmentModifier, ObjectiveModifier, ReinforcementModifier, TerrainModifier,
        UnitModifier,
    };

    vec![
        BattleModifier::new("night-battle", "Night Battle", Neutral, EnvironmentModifier)
            .with_description("Fighting in darkness; +1 to-hit for all attacks")
            .exclusive_with(["clear-skies"])
            .with_parameter("to_hit_modifier", 1.0),
        BattleModifier::new("clear-skies", "Clear Skies", Positive, EnvironmentModifier)
            .with_description("Perfect visibility and calm weather")
            .exclusive_with(["night-battle", "heavy-fog", "sandstorm", "blizzard"]),
        BattleModifier::new("heavy-fog", "Heavy Fog", Neutral, EnvironmentModifier)
            .with_description("Visibility limited to four hexes")
            .with_weight(0.8)
            .exclusive_with(["clear-skies"])
            .for_biomes(&[Biome::Temperate, Biome::Swamp, Biome::Jungle])
            .with_parameter("visibility_hexes", 4.0),
        BattleModifier::new("sandstorm", "Sandstorm", Negative, EnvironmentModifier)
            .with_description("Blowing sand; +1 to-hit and reduced visibility")
            .with_weight(0.8)
            .exclusive_with(["clear-skies"])
            .for_biomes(&[Biome::Desert])
            .with_parameter("to_hit_modifier", 1.0),
        BattleModifier::new("blizzard", "Blizzard", Negative, EnvironmentModifier)
            .with_description("Driving snow; movement costs +1 per hex")
            .with_weight(0.8)
            .exclusive_with(["clear-skies"])
            .for_biomes(&[Biome::Arctic])
            .with_parameter("movement_cost", 1.0),
        BattleModifier::new("extreme-heat", "Extreme Heat", Negative, EnvironmentModifier)
            .with_description("Ambient heat adds +2 heat per turn")
            .with_weight(0.7)
            .for_biomes(&[Biome::Desert, Biome::Volcanic])
            .with_parameter("heat_modifier", 2.0),
        BattleModifier::new(
            "enemy-reinforcements",
            "Enemy Reinforcements",
            Negative,
            ReinforcementModifier,
        )
        .with_description("A second wave worth a quarter of the OpFor arrives on turn 5")
        .with_weight(0.6)
        .with_parameter("bv_fraction", 0.25)
        .with_parameter("arrival_turn", 5.0),
        BattleModifier::new("allied-artillery", "Allied Artillery", Positive, UnitModifier)
            .with_description("Two off-board artillery strikes")
            .with_weight(0.5)
            .exclusive_with(["enemy-artillery"])
            .with_parameter("strikes", 2.0),
        BattleModifier::new("enemy-artillery", "Enemy Artillery", Negative, UnitModifier)
            .with_description("The OpFor calls two off-board artillery strikes")
            .with_weight(0.5)
            .exclusive_with(["allied-artillery"])
            .with_parameter("strikes", 2.0),
        BattleModifier::new(
            "extended-engagement",
            "Extended Engagement",
            Neutral,
            ObjectiveModifier,
        )
        .with_description("Four extra turns to complete the objective")
        .with_weight(0.7)
        .exclusive_with(["time-pressure"])
        .for_objectives(&[ObjectiveType::Destroy, ObjectiveType::Defend, ObjectiveType::Capture])
        .with_parameter(TURN_LIMIT_CHANGE, 4.0),
        BattleModifier::new("time-pressure", "Time Pressure", Negative, ObjectiveModifier)
            .with_description("Four fewer turns to complete the objective")
            .with_weight(0.7)
            .exclusive_with(["extended-engagement"])
            .for_objectives(&[
                ObjectiveType::Capture,
                ObjectiveType::Breakthrough,
                ObjectiveType::Escort,
                ObjectiveType::Recon,
            ])
            .with_parameter(TURN_LIMIT_CHANGE, -4.0),
        BattleModifier::new("forced-withdrawal", "Forced Withdrawal", Neutral, ObjectiveModifier)
            .with_description("Crippled units on both sides must withdraw")
            .with_weight(0.6),
        BattleModifier::new("civilian-presence", "Civilian Presence", Negative, TerrainModifier)
            .with_description("Collateral damage counts against the player")
            .with_weight(0.5)
            .for_biomes(&[Biome::Urban]),
        BattleModifier::new("good-intel", "Good Intelligence", Positive, UnitModifier)
            .with_description("+1 initiative for the first three turns")
            .with_weight(0.8)
            .with_parameter("initiative_bonus", 1.0),
        BattleModifier::new("dense-cover", "Dense Cover", Neutral, TerrainModifier)
            .with_description("Extra woods hexes scattered across the map")
            .with_weight(0.8)
            .for_biomes(&[Biome::Jungle, Biome::Swamp]),
    ]
}
