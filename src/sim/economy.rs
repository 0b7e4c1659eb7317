//! Door and buy-station purchases
//!
//! An interact press first tries to buy a closed door near the player. A door
//! purchase ends the interaction; otherwise buy stations in range are tried
//! according to the configured [`StationPolicy`]. Unaffordable purchases are
//! silent no-ops.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{BuyStation, GameEvent, GameState, StationKind};
use crate::consts::PLAYER_SIZE;
use crate::tuning::StationPolicy;

/// What an interact press would try at the player's current position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InteractionPrompt {
    Door { door: u32, cost: u32 },
    Station { kind: StationKind, cost: u32 },
}

/// What a completed interaction bought
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purchase {
    Door(u32),
    Stations(usize),
    Nothing,
}

fn station_in_range(station: &BuyStation, player_pos: Vec2) -> bool {
    player_pos.distance(station.pos) < station.radius + PLAYER_SIZE / 2.0
}

/// Indices of stations an interaction at `player_pos` would consider, in order
fn stations_to_try(stations: &[BuyStation], player_pos: Vec2, policy: StationPolicy) -> Vec<usize> {
    let in_range = stations
        .iter()
        .enumerate()
        .filter(|(_, s)| station_in_range(s, player_pos));
    match policy {
        StationPolicy::AllInRange => in_range.map(|(i, _)| i).collect(),
        StationPolicy::NearestOnly => in_range
            .min_by(|(_, a), (_, b)| {
                a.pos
                    .distance_squared(player_pos)
                    .total_cmp(&b.pos.distance_squared(player_pos))
            })
            .map(|(i, _)| i)
            .into_iter()
            .collect(),
    }
}

/// Resolve one interact press
pub fn interact(state: &mut GameState) -> Purchase {
    let player_pos = state.player.pos;
    let radius = state.tuning.door_interact_radius;
    let currency = state.player.currency;

    let door = state
        .geometry
        .doors
        .iter_mut()
        .filter(|d| !d.is_open() && player_pos.distance(d.rect.center()) < radius)
        .find(|d| currency >= d.cost);
    if let Some(door) = door {
        let (id, cost) = (door.id, door.cost);
        if state.player.try_spend(cost) {
            door.open();
            log::debug!("Door {} opened for {}", id, cost);
            state.emit(GameEvent::DoorOpened { door: id, cost });
            return Purchase::Door(id);
        }
    }

    let mut bought = 0;
    for index in stations_to_try(&state.stations, player_pos, state.tuning.station_policy) {
        let station = state.stations[index].clone();
        if !state.player.try_spend(station.cost) {
            continue;
        }
        match station.kind {
            StationKind::Ammo => {
                let cap = state.tuning.reserve_cap;
                state
                    .player
                    .arsenal
                    .add_reserve(state.tuning.station_ammo_amount, cap);
            }
            StationKind::Health => state.player.heal(state.tuning.station_health_amount),
        }
        log::debug!("Bought {:?} for {}", station.kind, station.cost);
        state.emit(GameEvent::StationPurchased {
            kind: station.kind,
            cost: station.cost,
            pos: station.pos,
        });
        bought += 1;
    }

    if bought > 0 {
        Purchase::Stations(bought)
    } else {
        Purchase::Nothing
    }
}

/// HUD hint: the door (preferred) or nearest station in reach, affordable or not
pub fn interaction_prompt(state: &GameState) -> Option<InteractionPrompt> {
    let player_pos = state.player.pos;
    let radius = state.tuning.door_interact_radius;

    if let Some(door) = state
        .geometry
        .doors
        .iter()
        .find(|d| !d.is_open() && player_pos.distance(d.rect.center()) < radius)
    {
        return Some(InteractionPrompt::Door {
            door: door.id,
            cost: door.cost,
        });
    }

    stations_to_try(&state.stations, player_pos, StationPolicy::NearestOnly)
        .first()
        .map(|&i| InteractionPrompt::Station {
            kind: state.stations[i].kind,
            cost: state.stations[i].cost,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BUY_STATION_SIZE;

    /// Door 0 of the reference level is centered on (715, 610)
    fn near_door_0(state: &mut GameState) {
        state.player.pos = Vec2::new(675.0, 610.0);
    }

    #[test]
    fn test_door_purchase() {
        let mut state = GameState::with_defaults(1);
        near_door_0(&mut state);
        state.player.currency = 150;

        assert_eq!(interact(&mut state), Purchase::Door(0));
        assert_eq!(state.player.currency, 50);
        assert!(state.geometry.door(0).unwrap().is_open());
        assert!(state.events.contains(&GameEvent::DoorOpened { door: 0, cost: 100 }));

        // Pressing again changes nothing
        assert_eq!(interact(&mut state), Purchase::Nothing);
        assert_eq!(state.player.currency, 50);
        assert!(state.geometry.door(0).unwrap().is_open());
    }

    #[test]
    fn test_door_unaffordable() {
        let mut state = GameState::with_defaults(1);
        near_door_0(&mut state);
        state.player.currency = 99;
        assert_eq!(interact(&mut state), Purchase::Nothing);
        assert_eq!(state.player.currency, 99);
        assert!(!state.geometry.door(0).unwrap().is_open());
    }

    #[test]
    fn test_door_out_of_range() {
        let mut state = GameState::with_defaults(1);
        state.player.pos = Vec2::new(665.0, 610.0);
        state.player.currency = 500;
        assert_eq!(interact(&mut state), Purchase::Nothing);
        assert_eq!(state.player.currency, 500);
    }

    #[test]
    fn test_door_preempts_station() {
        let mut state = GameState::with_defaults(1);
        near_door_0(&mut state);
        state.player.currency = 1000;
        state.stations.push(BuyStation {
            pos: state.player.pos,
            kind: StationKind::Health,
            cost: 75,
            radius: BUY_STATION_SIZE,
        });
        assert_eq!(interact(&mut state), Purchase::Door(0));
        assert_eq!(state.player.currency, 900);

        // Door is open now, so the next press reaches the station
        assert_eq!(interact(&mut state), Purchase::Stations(1));
        assert_eq!(state.player.currency, 825);
    }

    #[test]
    fn test_ammo_station() {
        let mut state = GameState::with_defaults(1);
        // Ammo station at (250, 1000)
        state.player.pos = Vec2::new(210.0, 1000.0);
        assert_eq!(interact(&mut state), Purchase::Stations(1));
        assert_eq!(state.player.currency, 50);
        assert_eq!(state.player.arsenal.reserve, 65);

        state.player.arsenal.reserve = 90;
        assert_eq!(interact(&mut state), Purchase::Stations(1));
        assert_eq!(state.player.arsenal.reserve, 100);
        assert_eq!(state.player.currency, 0);

        assert_eq!(interact(&mut state), Purchase::Nothing);
        assert_eq!(state.player.currency, 0);
    }

    #[test]
    fn test_health_station_caps_at_max() {
        let mut state = GameState::with_defaults(1);
        state.player.pos = Vec2::new(800.0, 340.0);
        state.player.health = 70.0;
        assert_eq!(interact(&mut state), Purchase::Stations(1));
        assert_eq!(state.player.health, 100.0);
        assert_eq!(state.player.currency, 25);
    }

    fn two_stations(state: &mut GameState) {
        state.player.pos = Vec2::new(1000.0, 900.0);
        state.player.currency = 200;
        state.stations = vec![
            BuyStation {
                pos: Vec2::new(1030.0, 900.0),
                kind: StationKind::Ammo,
                cost: 50,
                radius: BUY_STATION_SIZE,
            },
            BuyStation {
                pos: Vec2::new(1010.0, 900.0),
                kind: StationKind::Ammo,
                cost: 50,
                radius: BUY_STATION_SIZE,
            },
        ];
    }

    #[test]
    fn test_all_in_range_stacks() {
        let mut state = GameState::with_defaults(1);
        two_stations(&mut state);
        assert_eq!(interact(&mut state), Purchase::Stations(2));
        assert_eq!(state.player.currency, 100);
        assert_eq!(state.player.arsenal.reserve, 95);
    }

    #[test]
    fn test_nearest_only_buys_once() {
        let mut state = GameState::with_defaults(1);
        state.tuning.station_policy = StationPolicy::NearestOnly;
        two_stations(&mut state);
        assert_eq!(interact(&mut state), Purchase::Stations(1));
        assert_eq!(state.player.currency, 150);
        let bought_at = state.events.iter().find_map(|e| match e {
            GameEvent::StationPurchased { pos, .. } => Some(*pos),
            _ => None,
        });
        assert_eq!(bought_at, Some(Vec2::new(1010.0, 900.0)));
    }

    #[test]
    fn test_prompt() {
        let mut state = GameState::with_defaults(1);
        state.player.pos = Vec2::new(210.0, 1000.0);
        assert_eq!(
            interaction_prompt(&state),
            Some(InteractionPrompt::Station {
                kind: StationKind::Ammo,
                cost: 50
            })
        );
        near_door_0(&mut state);
        assert_eq!(
            interaction_prompt(&state),
            Some(InteractionPrompt::Door { door: 0, cost: 100 })
        );
        state.player.pos = Vec2::new(1000.0, 900.0);
        assert_eq!(interaction_prompt(&state), None);
    }
}
