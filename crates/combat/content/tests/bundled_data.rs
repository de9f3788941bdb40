//! The shipped data set loads, cross-checks, and drives a real exchange.

use combat_content::{Catalog, ContentFactory};
use combat_core::{
    CombatScene, Exchange, ModifierContext, PcgRng, Position, TableHooks, UnitId, forecast,
    resolve,
};

fn catalog() -> Catalog {
    ContentFactory::bundled()
        .load_catalog()
        .expect("bundled data is valid")
}

#[test]
fn every_preset_builds() {
    let catalog = catalog();
    assert!(!catalog.units.is_empty());
    for (i, preset) in catalog.units.iter().enumerate() {
        let unit = catalog
            .unit(&preset.name, UnitId(i as u32), Position::default())
            .expect("preset builds");
        assert!(unit.current_hp >= 1 && unit.current_hp <= unit.stats.hp);
        assert!(unit.weapon.is_some(), "{} is armed", preset.name);
    }
}

#[test]
fn specials_and_grants_are_resolved() {
    let catalog = catalog();
    let brave = catalog.weapon("Brave Sword").expect("brave sword");
    assert!(brave.capabilities.is_brave());
    assert_eq!(brave.strikes_per_slot(), 2);
    let brand = catalog.weapon("Solar Brand").expect("solar brand");
    assert_eq!(brand.granted_abilities, vec!["sol".to_string()]);
    assert!(catalog.terrain("Forest").is_some());
    assert!(catalog.art("grounder").is_some());
}

#[test]
fn myrmidon_doubles_brigand() {
    let catalog = catalog();
    let myrmidon = catalog
        .unit("Myrmidon", UnitId(1), Position::new(0, 0))
        .expect("myrmidon");
    let brigand = catalog
        .unit("Brigand", UnitId(2), Position::new(1, 0))
        .expect("brigand");

    let attacker_mods = CombatScene::new(&myrmidon, &brigand, true)
        .modifiers(&catalog.abilities, &catalog.affixes);
    let defender_mods = CombatScene::new(&brigand, &myrmidon, false)
        .modifiers(&catalog.abilities, &catalog.affixes);
    assert!(defender_mods.activated.iter().any(|a| a.id == "brutal"));

    let ctx = ModifierContext::new(attacker_mods, defender_mods);
    let exchange = Exchange::new(&myrmidon, &brigand, &ctx, &catalog.config)
        .with_affixes(&catalog.affixes);

    // AS 14 - (5 - 7/5) = 10 against 7 - (10 - 10/5) = -1
    let preview = forecast(&exchange);
    assert!(preview.attacker.doubles);
    assert!(!preview.defender.doubles);
    assert!(preview.defender_can_counter());
    assert_eq!(preview.attacker.attack_count, 2);
    assert_eq!(preview.defender.attack_count, 1);

    let hooks = TableHooks::new(&catalog.abilities, &catalog.affixes);
    let result = resolve(&exchange, &hooks, &mut PcgRng::new(42));
    assert!(result.strikes().count() >= 1);
    assert!(result.defender_hp <= brigand.current_hp);
}
