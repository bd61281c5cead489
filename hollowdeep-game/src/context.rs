//! Battle-scoped mutable state: boss vitals and the borrowed player entity.

use crate::constants::DEFEND_DAMAGE_DIVISOR;

/// Capability the battle requires from the externally-owned player entity.
///
/// The engine borrows the entity for the duration of one encounter and
/// mutates it only through this interface.
pub trait Player {
    fn hp(&self) -> i32;
    fn take_damage(&mut self, amount: i32);
    fn is_alive(&self) -> bool;
}

/// Mutable record of one encounter: boss HP plus the defend flag.
///
/// HP is clamped at the point of mutation; it never goes negative and never
/// exceeds the maximum.
#[derive(Debug)]
pub struct BattleContext<'a, P: Player> {
    boss_hp: i32,
    boss_max_hp: i32,
    player: &'a mut P,
    player_defending: bool,
}

impl<'a, P: Player> BattleContext<'a, P> {
    pub fn new(player: &'a mut P, boss_max_hp: i32) -> Self {
        let max = boss_max_hp.max(1);
        Self {
            boss_hp: max,
            boss_max_hp: max,
            player,
            player_defending: false,
        }
    }

    #[must_use]
    pub const fn boss_hp(&self) -> i32 {
        self.boss_hp
    }

    #[must_use]
    pub const fn boss_max_hp(&self) -> i32 {
        self.boss_max_hp
    }

    /// Boss HP as a fraction of its maximum, always within [0, 1].
    #[must_use]
    pub fn boss_hp_percent(&self) -> f32 {
        (f64::from(self.boss_hp) / f64::from(self.boss_max_hp)) as f32
    }

    /// Damage to the boss; HP floors at zero.
    pub fn deal_damage_to_boss(&mut self, amount: i32) {
        self.boss_hp = (self.boss_hp - amount.max(0)).max(0);
    }

    /// Forward damage to the player entity; negative amounts are ignored.
    pub fn deal_damage_to_player(&mut self, amount: i32) {
        self.player.take_damage(amount.max(0));
    }

    /// Boss-inflicted pair or fallback damage after the defend mitigation.
    /// Clash recoil bypasses this.
    #[must_use]
    pub const fn mitigated_player_damage(&self, amount: i32) -> i32 {
        if self.player_defending {
            amount / DEFEND_DAMAGE_DIVISOR
        } else {
            amount
        }
    }

    #[must_use]
    pub const fn is_player_defending(&self) -> bool {
        self.player_defending
    }

    pub fn set_player_defending(&mut self, defending: bool) {
        self.player_defending = defending;
    }

    #[must_use]
    pub fn player_hp(&self) -> i32 {
        self.player.hp()
    }

    #[must_use]
    pub fn player_alive(&self) -> bool {
        self.player.is_alive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy {
        hp: i32,
    }

    impl Player for Dummy {
        fn hp(&self) -> i32 {
            self.hp
        }

        fn take_damage(&mut self, amount: i32) {
            self.hp = (self.hp - amount).max(0);
        }

        fn is_alive(&self) -> bool {
            self.hp > 0
        }
    }

    #[test]
    fn boss_damage_floors_at_zero() {
        let mut player = Dummy { hp: 50 };
        let mut ctx = BattleContext::new(&mut player, 200);
        ctx.deal_damage_to_boss(150);
        assert_eq!(ctx.boss_hp(), 50);
        ctx.deal_damage_to_boss(999);
        assert_eq!(ctx.boss_hp(), 0);
        ctx.deal_damage_to_boss(-30);
        assert_eq!(ctx.boss_hp(), 0);
    }

    #[test]
    fn hp_percent_is_idempotent_between_mutations() {
        let mut player = Dummy { hp: 50 };
        let mut ctx = BattleContext::new(&mut player, 200);
        ctx.deal_damage_to_boss(50);
        let first = ctx.boss_hp_percent();
        let second = ctx.boss_hp_percent();
        assert!((first - second).abs() < f32::EPSILON);
        assert!((first - 0.75).abs() < f32::EPSILON);
    }

    #[test]
    fn player_damage_never_goes_negative() {
        let mut player = Dummy { hp: 50 };
        let mut ctx = BattleContext::new(&mut player, 200);
        ctx.deal_damage_to_player(-10);
        assert_eq!(ctx.player_hp(), 50);
        ctx.deal_damage_to_player(20);
        assert_eq!(ctx.player_hp(), 30);
    }

    #[test]
    fn defend_mitigation_halves_rounding_down() {
        let mut player = Dummy { hp: 50 };
        let mut ctx = BattleContext::new(&mut player, 200);
        assert_eq!(ctx.mitigated_player_damage(25), 25);
        ctx.set_player_defending(true);
        assert_eq!(ctx.mitigated_player_damage(25), 12);
        assert_eq!(ctx.mitigated_player_damage(1), 0);
        ctx.set_player_defending(false);
        assert_eq!(ctx.mitigated_player_damage(25), 25);
    }

    #[test]
    fn degenerate_max_hp_is_clamped() {
        let mut player = Dummy { hp: 50 };
        let ctx = BattleContext::new(&mut player, 0);
        assert_eq!(ctx.boss_max_hp(), 1);
        assert!((ctx.boss_hp_percent() - 1.0).abs() < f32::EPSILON);
    }
}
