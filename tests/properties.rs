//! Property tests for the combat model, the team disciplines and the pokedex.

use battle_tower::pokemon::raw_damage;
use battle_tower::{
    BattleMode, Criterion, Formation, PokeType, PokemonInst, RankedList, SpeciesData, Trainer,
};
use proptest::prelude::*;
use schema::{EnumCount, IntoEnumIterator};

fn pokemon(name: String, health: u32, defence: u32) -> PokemonInst {
    PokemonInst::new(&SpeciesData {
        name,
        poke_type: PokeType::Normal,
        level: 1,
        health,
        battle_power: 10,
        defence,
        speed: 10,
        experience: 0,
        evolution_line: Vec::new(),
    })
}

fn team(healths: &[u32]) -> Vec<PokemonInst> {
    healths
        .iter()
        .enumerate()
        .map(|(i, &health)| pokemon(format!("p{}", i), health, 10))
        .collect()
}

fn names(pokemon: &[&PokemonInst]) -> Vec<String> {
    pokemon.iter().map(|p| p.name.clone()).collect()
}

/// Generate a health value for a freshly created Pokemon.
fn arb_health() -> impl Strategy<Value = u32> {
    1u32..500u32
}

/// Generate a team of one to six health values.
fn arb_team() -> impl Strategy<Value = Vec<u32>> {
    proptest::collection::vec(arb_health(), 1..=6)
}

#[derive(Debug, Clone)]
enum Hit {
    Defend(f64),
    Chip,
}

fn arb_hit() -> impl Strategy<Value = Hit> {
    prop_oneof![
        (0.0f64..200.0).prop_map(Hit::Defend),
        Just(Hit::Chip),
    ]
}

proptest! {
    #[test]
    fn alive_iff_health_positive(
        health in arb_health(),
        defence in 1u32..100,
        hits in proptest::collection::vec(arb_hit(), 0..20),
    ) {
        let mut target = pokemon("target".to_string(), health, defence);
        prop_assert!(target.is_alive());
        for hit in hits {
            match hit {
                Hit::Defend(damage) => target.defend(damage),
                Hit::Chip => target.take_chip_damage(),
            }
            prop_assert_eq!(target.is_alive(), target.health > 0.0);
        }
    }

    #[test]
    fn raw_damage_is_positive_and_bounded(attack in 1u32..500, defence in 1u32..500) {
        let (attack, defence) = (f64::from(attack), f64::from(defence));
        let damage = raw_damage(attack, defence);
        prop_assert!(damage > 0.0);
        prop_assert!(damage <= attack);
    }

    #[test]
    fn ranked_toggle_is_an_involution(healths in arb_team()) {
        let mut list = RankedList::new(Criterion::Health, false);
        for member in team(&healths) {
            list.add(member);
        }
        let before: Vec<String> = list.iter().map(|p| p.name.clone()).collect();

        list.toggle();
        let flipped: Vec<String> = list.iter().map(|p| p.name.clone()).collect();
        let mut reversed = before.clone();
        reversed.reverse();
        prop_assert_eq!(&flipped, &reversed);

        list.toggle();
        let after: Vec<String> = list.iter().map(|p| p.name.clone()).collect();
        prop_assert_eq!(after, before);
    }

    #[test]
    fn stack_draws_last_selected_first(healths in arb_team()) {
        let mut formation =
            Formation::assemble(BattleMode::Set, Criterion::Health, false, team(&healths));
        let last = format!("p{}", healths.len() - 1);
        prop_assert_eq!(formation.draw().map(|p| p.name), Some(last));
    }

    #[test]
    fn rotation_returns_survivor_after_everyone_else(healths in arb_team()) {
        let members = team(&healths);
        let mut formation =
            Formation::assemble(BattleMode::Rotate, Criterion::Health, false, members);
        let expected_rest = names(&formation.in_draw_order())[1..].to_vec();

        let first = formation.draw().unwrap();
        let first_name = first.name.clone();
        formation.give_back(first);

        let mut drawn = Vec::new();
        while let Some(next) = formation.draw() {
            drawn.push(next.name);
        }
        prop_assert_eq!(drawn.last(), Some(&first_name));
        prop_assert_eq!(&drawn[..drawn.len() - 1], &expected_rest[..]);
    }

    #[test]
    fn pokedex_completion_is_rounded_and_never_decreases(
        picks in proptest::collection::vec(0usize..PokeType::COUNT, 0..40),
    ) {
        let all: Vec<PokeType> = PokeType::iter().collect();
        let mut trainer = Trainer::new("Oak");
        let mut previous = trainer.pokedex_completion();
        for pick in picks {
            trainer.register_type(all[pick]);
            let completion = trainer.pokedex_completion();
            let expected =
                (trainer.pokedex().len() as f64 / PokeType::COUNT as f64 * 100.0).round() / 100.0;
            prop_assert_eq!(completion, expected);
            prop_assert!(completion >= previous);
            previous = completion;
        }
    }
}
