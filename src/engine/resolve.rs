//! Step execution and square resolution.
//!
//! Resolution runs once per arrival at a square, including arrivals caused by
//! gimmick or mystery displacement. First match wins:
//!
//! 1. Goal: the arriving player wins.
//! 2. Shared square: collision, one random survivor.
//! 3. Gimmick square.
//! 4. Mystery square.
//! 5. Otherwise the turn passes.

use smallvec::SmallVec;
use tracing::{debug, info, trace};

use super::step::{Step, WalkPurpose};
use super::TurnEngine;
use crate::board::{clamp_square, Gimmick, GimmickEffect, Square, RANDOM_BIG_STEPS};
use crate::core::{PlayerId, RandomSource, PLAYER_COUNT};
use crate::effects::{draw_rotation, Followup, MysteryOutcome, PendingMystery};
use crate::present::{Cue, Importance, Renderer, RollTier, Sink};

impl<R: RandomSource, S: Sink, V: Renderer> TurnEngine<R, S, V> {
    pub(crate) fn run_step(&mut self, step: Step) {
        debug!(?step, "step");
        match step {
            Step::Roll { player } => self.roll_step(player),
            Step::Walk { player, target, purpose } => self.walk_step(player, target, purpose),
            Step::Resolve { player } => self.resolve_square(player),
            Step::SendHome { player } => self.send_home(player),
            Step::AdvanceTurn => self.advance_turn(),
            Step::SpinRoulette { player } => self.spin_roulette(player),
            Step::RevealMystery { player, rotation } => self.reveal_mystery(player, rotation),
        }
    }

    // === Roll & move ===

    fn roll_step(&mut self, player: PlayerId) {
        let face = self.rng.uniform_int(1, 6).clamp(1, 6) as u8;
        let tier = RollTier::classify(face);

        let (name, doubled) = {
            let p = self.session.player_mut(player);
            p.stats.record_roll(face);
            let doubled = std::mem::take(&mut p.double_next_roll);
            (p.name.clone(), doubled)
        };

        self.sink.notify(tier.cue());
        self.log(format!("{name}が{face}を出しました！"), Importance::Normal);

        let steps = if doubled {
            let steps = face * 2;
            self.log(format!("サイコロ2倍適用！最終値: {steps}"), Importance::Important);
            self.sink.notify(Cue::DoubleBonus);
            steps
        } else {
            face
        };
        debug!(%player, face, steps, ?tier, "dice rolled");

        let position = self.session.player(player).position;
        let target = clamp_square(i32::from(position) + i32::from(steps));
        self.renderer.show_dice(face, steps);
        self.session.prediction = Some(target);
        self.renderer.highlight_prediction(Some(target));

        self.queue.push(
            self.config.timings.prediction(),
            Step::Walk { player, target, purpose: WalkPurpose::Roll },
        );
    }

    fn walk_step(&mut self, player: PlayerId, target: Square, purpose: WalkPurpose) {
        self.clear_prediction();

        let position = self.session.player(player).position;
        if position != target {
            let next = if target > position { position + 1 } else { position - 1 };
            self.session.player_mut(player).position = next;
            trace!(%player, square = next, "walk");
            self.render_piece(player);
            if purpose == WalkPurpose::Roll {
                self.sink.notify(Cue::Move);
            }
        }

        if self.session.player(player).position == target {
            self.finish_walk(player, purpose);
        } else {
            self.queue.push(
                self.config.timings.step(),
                Step::Walk { player, target, purpose },
            );
        }
    }

    fn finish_walk(&mut self, player: PlayerId, purpose: WalkPurpose) {
        let position = self.session.player(player).position;
        match purpose {
            WalkPurpose::Roll => {
                let name = self.session.player(player).name.clone();
                self.log(format!("{name}が{position}に移動しました。"), Importance::Normal);
            }
            WalkPurpose::Effect if position == self.board.goal() => {
                self.end_game(player);
                return;
            }
            WalkPurpose::Effect => {}
        }
        self.queue.push(self.config.timings.step(), Step::Resolve { player });
    }

    /// Displace a player by `delta` squares, one square per step.
    fn begin_effect_walk(&mut self, player: PlayerId, delta: i16) {
        let (name, position) = {
            let p = self.session.player(player);
            (p.name.clone(), p.position)
        };
        if delta != 0 {
            let direction = if delta > 0 { "進む" } else { "戻る" };
            self.log(format!("{name}が{}マス{direction}！", delta.unsigned_abs()), Importance::Normal);
        }

        let target = clamp_square(i32::from(position) + i32::from(delta));
        if target == position {
            self.finish_walk(player, WalkPurpose::Effect);
        } else {
            self.queue.push(
                std::time::Duration::ZERO,
                Step::Walk { player, target, purpose: WalkPurpose::Effect },
            );
        }
    }

    // === Square resolution ===

    pub(crate) fn resolve_square(&mut self, player: PlayerId) {
        let square = self.session.player(player).position;

        if square == self.board.goal() {
            self.end_game(player);
        } else if self.session.is_shared(player, square) {
            self.resolve_collision(square);
        } else if let Some(gimmick) = self.board.gimmick(square).cloned() {
            self.session.player_mut(player).stats.gimmick_hits += 1;
            self.resolve_gimmick(player, &gimmick);
        } else if self.board.is_mystery(square) {
            self.session.player_mut(player).stats.mystery_hits += 1;
            self.open_mystery_box(player);
        } else {
            self.advance_turn();
        }
    }

    fn resolve_collision(&mut self, square: Square) {
        let occupants = self.session.occupants(square);
        let survivor = occupants[self.rng.uniform_index(occupants.len())];
        let losers: SmallVec<[PlayerId; PLAYER_COUNT]> =
            occupants.iter().copied().filter(|&p| p != survivor).collect();

        debug!(square, %survivor, losers = losers.len(), "collision");
        self.sink.notify(Cue::Collision);
        self.renderer.show_collision(square);
        let winner = self.session.player(survivor).name.clone();
        self.log(
            format!("{square}マスで衝突発生！ {winner}が残り、他はスタートへ！"),
            Importance::Important,
        );

        let stagger = self.config.timings.collision_stagger();
        for (i, &loser) in losers.iter().enumerate() {
            let wait = if i == 0 { std::time::Duration::ZERO } else { stagger };
            self.queue.push(wait, Step::SendHome { player: loser });
        }
        self.queue.push(stagger, Step::AdvanceTurn);
    }

    fn send_home(&mut self, player: PlayerId) {
        self.session.player_mut(player).position = 0;
        self.render_piece(player);
        self.sink.notify(Cue::ReturnStart);
    }

    fn resolve_gimmick(&mut self, player: PlayerId, gimmick: &Gimmick) {
        let name = self.session.player(player).name.clone();
        debug!(%player, gimmick = %gimmick.name, effect = ?gimmick.effect, "gimmick");
        self.sink.notify(gimmick.cue);
        self.log(format!("{name}が「{}」マスに！", gimmick.name), Importance::Important);

        match gimmick.effect {
            GimmickEffect::ExtraTurn => {}
            GimmickEffect::Skip => {
                let p = self.session.player_mut(player);
                p.skip_turns = p.skip_turns.saturating_add(1);
                self.log(format!("{name}は次回1回休み。"), Importance::Normal);
            }
            GimmickEffect::Swap => {
                let others: SmallVec<[PlayerId; PLAYER_COUNT]> =
                    PlayerId::all().filter(|&p| p != player).collect();
                let target = others[self.rng.uniform_index(others.len())];
                self.session.swap_positions(player, target);
                self.render_piece(player);
                self.render_piece(target);
                let other = self.session.player(target).name.clone();
                self.log(format!("{name}と{other}の位置が交換！"), Importance::Normal);
            }
            GimmickEffect::ToStart => {
                self.session.player_mut(player).position = 0;
                self.render_piece(player);
                self.log(format!("{name}はスタートへ。"), Importance::Normal);
            }
            GimmickEffect::AllBack(n) => {
                let moved: SmallVec<[PlayerId; PLAYER_COUNT]> = self
                    .session
                    .players
                    .iter_mut()
                    .filter(|(_, p)| p.position > 0)
                    .map(|(id, p)| {
                        p.position = p.position.saturating_sub(n);
                        id
                    })
                    .collect();
                for id in moved {
                    self.render_piece(id);
                }
                self.log(format!("全員が{n}マス後退！"), Importance::Normal);
            }
            GimmickEffect::RandomBig => {
                let steps = i16::from(RANDOM_BIG_STEPS);
                let delta = if self.rng.uniform_float() < 0.5 { steps } else { -steps };
                self.begin_effect_walk(player, delta);
            }
            GimmickEffect::Advance(_) | GimmickEffect::Retreat(_) => {
                if let Some(delta) = gimmick.effect.fixed_displacement() {
                    self.begin_effect_walk(player, delta);
                }
            }
        }

        self.follow_up(player, gimmick.effect.followup());
    }

    // === Mystery box ===

    fn open_mystery_box(&mut self, player: PlayerId) {
        self.session.processing = true;
        let name = self.session.player(player).name.clone();
        debug!(%player, "mystery box opened");
        self.sink.notify(Cue::MysteryBox);
        self.log(format!("{name}がミステリーボックスを発見！"), Importance::Important);
        self.queue.push(
            self.config.timings.roulette_open(),
            Step::SpinRoulette { player },
        );
    }

    fn spin_roulette(&mut self, player: PlayerId) {
        let rotation = draw_rotation(&mut self.rng);
        self.renderer.spin_roulette(rotation);
        self.queue.push(
            self.config.timings.roulette_spin(),
            Step::RevealMystery { player, rotation },
        );
    }

    fn reveal_mystery(&mut self, player: PlayerId, rotation: f64) {
        let outcome = MysteryOutcome::from_rotation(rotation);
        debug!(%player, rotation, ?outcome, "mystery revealed");
        self.session.pending_mystery = Some(PendingMystery { player, outcome, rotation });
        self.session.processing = false;
        self.log(format!("ルーレットの結果: {}", outcome.name()), Importance::Normal);
        self.render_board();
    }

    pub(crate) fn apply_mystery(&mut self, player: PlayerId, outcome: MysteryOutcome) {
        let name = self.session.player(player).name.clone();
        debug!(%player, ?outcome, "mystery applied");
        self.sink.notify(outcome.cue());
        self.log(format!("ミステリー効果: {}！", outcome.name()), Importance::Important);

        match outcome {
            MysteryOutcome::Rocket => {
                self.begin_effect_walk(player, i16::from(crate::effects::ROCKET_STEPS));
            }
            MysteryOutcome::ReturnToStart => {
                self.session.player_mut(player).position = 0;
                self.render_piece(player);
            }
            MysteryOutcome::StealSteps => {
                let victims: SmallVec<[PlayerId; PLAYER_COUNT]> = self
                    .session
                    .players
                    .iter_mut()
                    .filter(|(id, p)| *id != player && p.position > 0)
                    .map(|(id, p)| {
                        p.position -= 1;
                        id
                    })
                    .collect();
                for &id in &victims {
                    self.render_piece(id);
                }
                let stolen = victims.len() as i16;
                if stolen > 0 {
                    self.log(format!("他のプレイヤーから合計{stolen}マスを吸収！"), Importance::Normal);
                }
                self.begin_effect_walk(player, stolen);
            }
            MysteryOutcome::SwapWithLast => match self.session.rearmost_other(player) {
                Some(last)
                    if self.session.player(last).position
                        < self.session.player(player).position =>
                {
                    let other = self.session.player(last).name.clone();
                    self.log(format!("最下位の{other}と場所を交換！"), Importance::Normal);
                    self.session.swap_positions(player, last);
                    self.render_piece(player);
                    self.render_piece(last);
                }
                _ => {
                    self.log("自分が最下位なので何も起きなかった！", Importance::Normal);
                }
            },
            MysteryOutcome::SkipOne => {
                self.session.player_mut(player).skip_turns = 1;
                self.log(format!("{name}は次回1回休み。"), Importance::Normal);
            }
            MysteryOutcome::ExtraTurn => {}
        }

        self.follow_up(player, outcome.followup());
    }

    // === Turn advancement ===

    fn follow_up(&mut self, player: PlayerId, followup: Followup) {
        if self.session.ended {
            return;
        }
        match followup {
            Followup::AdvanceTurn => self.advance_turn(),
            Followup::ExtraTurn => self.grant_extra_turn(player),
            // The effect walk already queued its own resolution.
            Followup::Resolve => {}
        }
    }

    fn grant_extra_turn(&mut self, player: PlayerId) {
        let name = self.session.player(player).name.clone();
        debug!(%player, "extra turn");
        self.log(format!("{name}はもう一度サイコロを振れます！"), Importance::Normal);
        self.clear_prediction();
        self.session.processing = false;
        self.session.roll_enabled = true;
        self.render_board();
    }

    pub(crate) fn advance_turn(&mut self) {
        self.session.current = self.session.current.next();
        if self.session.current.index() == 0 {
            self.session.turn_number += 1;
        }
        self.clear_prediction();
        self.session.processing = false;
        self.session.roll_enabled = true;
        debug!(
            current = %self.session.current,
            turn = self.session.turn_number,
            "turn advanced"
        );
        self.check_reach();
        self.render_board();
    }

    fn check_reach(&mut self) {
        let in_reach = self.session.in_reach();

        if !self.session.reach && !in_reach.is_empty() {
            self.session.reach = true;
            let current = self.session.current;
            let herald = if in_reach.contains(&current) { current } else { in_reach[0] };
            let name = self.session.player(herald).name.clone();
            info!(player = %herald, "reach");
            self.log(format!("{name}がゴールまであと少し！リーチ！"), Importance::Important);
            self.sink.notify(Cue::Reach);
            self.set_bgm(crate::present::BgmTrack::Finale);
        } else if self.session.reach && in_reach.is_empty() {
            self.session.reach = false;
            debug!("reach cleared");
            self.set_bgm(crate::present::BgmTrack::Normal);
        }
    }

    pub(crate) fn end_game(&mut self, winner: PlayerId) {
        if self.session.ended {
            return;
        }

        self.queue.clear();
        self.session.record_win(winner);
        self.session.processing = true;
        self.session.roll_enabled = false;
        self.session.prediction = None;

        let name = self.session.player(winner).name.clone();
        info!(%winner, turns = self.session.turn_number, "game over");
        self.sink.notify(Cue::Win);
        self.sink.notify(Cue::Firework);
        self.set_bgm(crate::present::BgmTrack::Stopped);
        self.log(format!("{name}がゴール！勝利です！🎉"), Importance::Important);

        let summary: Vec<String> = self
            .session
            .players
            .values()
            .map(|p| {
                format!(
                    "{}: 平均の出目 {:.1} / 6が出た回数 {}回 / ギミックマス {}回 / ミステリーマス {}回",
                    p.name,
                    p.stats.average_roll(),
                    p.stats.sixes,
                    p.stats.gimmick_hits,
                    p.stats.mystery_hits,
                )
            })
            .collect();
        for line in summary {
            self.log(line, Importance::Normal);
        }
        self.log(format!("総ターン数: {}", self.session.turn_number), Importance::Normal);
        self.render_board();
    }
}
