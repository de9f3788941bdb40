use crate::env::{Weapon, WeaponArt};
use crate::modifiers::{Activation, ActivationSource, CombatFlags, ModifierSet, effects_modifiers};

/// Modifiers granted by an active weapon art.
///
/// The result always carries [`CombatFlags::WEAPON_ART`], which stops its
/// owner from doubling. `weapon` is the art user's weapon.
pub fn art_modifiers(art: &WeaponArt, weapon: Option<&Weapon>) -> ModifierSet {
    let mut mods = effects_modifiers(&art.effects, weapon);
    mods.flags |= CombatFlags::WEAPON_ART;
    mods.activated
        .push(Activation::new(ActivationSource::WeaponArt, &art.id, &art.name));
    mods
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{AbilityEffects, WeaponCategory};
    use crate::state::WeaponRank;

    #[test]
    fn art_sets_flag_and_bonuses() {
        let art = WeaponArt {
            id: "grounder".into(),
            name: "Grounder".into(),
            category: WeaponCategory::Sword,
            required_rank: WeaponRank::Prof,
            initiation_only: true,
            hp_cost: 0,
            per_map_limit: 0,
            per_turn_limit: 0,
            effects: AbilityEffects {
                atk_bonus: 3,
                hit_bonus: 20,
                ..AbilityEffects::default()
            },
        };
        let mods = art_modifiers(&art, None);
        assert!(mods.has(CombatFlags::WEAPON_ART));
        assert_eq!((mods.atk_bonus, mods.hit_bonus), (3, 20));
        assert_eq!(mods.activated[0].source, ActivationSource::WeaponArt);
    }
}
