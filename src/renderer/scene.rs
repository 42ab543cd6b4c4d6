//! Read-only frame drawing
//!
//! Order: clear, player, boss and its breaths, falling items, debug overlay.

use glam::Vec2;

use super::palette::{self, Color};
use super::{RenderTarget, Shape};
use crate::assets::{AssetRegistry, SpriteId};
use crate::settings::Settings;
use crate::sim::{Aabb, Boss, FallingItem, GameState, ItemKind, Player, Projectile};

/// Boss health bar dimensions
const HP_BAR_WIDTH: f32 = 200.0;
const HP_BAR_HEIGHT: f32 = 20.0;
const HP_BAR_TOP: f32 = 20.0;

const BOSS_NAME: &str = "KAIDO";

/// Host-measured values shown in the corner readout
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugOverlay {
    pub fps: f32,
}

/// Draw the whole scene for the current state
pub fn draw_frame<T: RenderTarget + ?Sized>(
    state: &GameState,
    assets: &AssetRegistry,
    settings: &Settings,
    overlay: &DebugOverlay,
    target: &mut T,
) {
    target.clear(state.bounds.width, state.bounds.height);

    draw_player(&state.player, assets, settings, target);

    if let Some(boss) = &state.boss {
        draw_boss(boss, state.bounds.width, assets, target);
        for projectile in &state.projectiles {
            draw_projectile(projectile, assets, target);
        }
    }

    for item in &state.items {
        draw_item(item, assets, target);
    }

    if settings.show_debug_overlay {
        draw_overlay(state, overlay, target);
    }
}

fn draw_player<T: RenderTarget + ?Sized>(
    player: &Player,
    assets: &AssetRegistry,
    settings: &Settings,
    target: &mut T,
) {
    let sprite = SpriteId::Player(player.gear);
    if assets.is_ready(sprite) {
        let rect = player.bounds().grown_upward(player.gear.draw_scale());
        target.draw_sprite(sprite, rect, false);
    } else {
        target.draw_shape(Shape::Rect(player.bounds()), palette::PLAYER);
    }

    if player.gear.shows_steam() {
        for puff in player.steam.iter().take(settings.max_particles()) {
            target.draw_shape(
                Shape::Circle {
                    center: puff.pos,
                    radius: puff.radius,
                },
                palette::with_alpha(palette::STEAM, puff.opacity),
            );
        }
    }
}

fn draw_boss<T: RenderTarget + ?Sized>(boss: &Boss, screen_width: f32, assets: &AssetRegistry, target: &mut T) {
    if !boss.active {
        return;
    }

    let rect = boss.bounds();
    if assets.is_ready(SpriteId::Boss) {
        target.draw_sprite(SpriteId::Boss, rect, false);
    } else {
        target.draw_shape(
            Shape::Ellipse {
                center: rect.center(),
                radii: Vec2::new(rect.width / 2.0, rect.height / 3.0),
            },
            palette::BOSS,
        );
        target.draw_text(BOSS_NAME, Vec2::new(rect.x + 40.0, rect.y + 80.0), 20.0, palette::OUTLINE);
    }

    let bar = Aabb::new((screen_width - HP_BAR_WIDTH) / 2.0, HP_BAR_TOP, HP_BAR_WIDTH, HP_BAR_HEIGHT);
    let fill = Aabb {
        width: bar.width * boss.health_fraction(),
        ..bar
    };
    target.draw_shape(Shape::Rect(bar), palette::HP_BACK);
    target.draw_shape(Shape::Rect(fill), palette::HP_FILL);
    target.draw_shape(Shape::OutlineRect(bar), palette::OUTLINE);
    target.draw_text(
        &format!("BOSS HP: {}/{}", boss.hp, boss.max_hp),
        Vec2::new(bar.x + 50.0, bar.y + 16.0),
        16.0,
        palette::OUTLINE,
    );
}

fn draw_projectile<T: RenderTarget + ?Sized>(projectile: &Projectile, assets: &AssetRegistry, target: &mut T) {
    let rect = projectile.bounds();
    if assets.is_ready(SpriteId::Breath) {
        target.draw_sprite(SpriteId::Breath, rect, projectile.is_parried());
        return;
    }

    let center = rect.center();
    target.draw_shape(
        Shape::Circle {
            center,
            radius: rect.width / 2.0,
        },
        palette::BREATH_OUTER,
    );
    target.draw_shape(
        Shape::Circle {
            center,
            radius: rect.width / 4.0,
        },
        palette::BREATH_INNER,
    );
}

fn draw_item<T: RenderTarget + ?Sized>(item: &FallingItem, assets: &AssetRegistry, target: &mut T) {
    let sprite = SpriteId::for_item(item.kind);
    let rect = item.bounds();
    if assets.is_ready(sprite) {
        target.draw_sprite(sprite, rect, false);
        return;
    }

    let fruit = |color: Color| {
        (
            Shape::Circle {
                center: rect.center(),
                radius: rect.width / 2.0,
            },
            color,
        )
    };
    let (shape, color) = match item.kind {
        ItemKind::Meat => (Shape::Rect(rect), palette::MEAT),
        ItemKind::GoodFruit => fruit(palette::GOOD_FRUIT),
        ItemKind::BadFruit { .. } => fruit(palette::BAD_FRUIT),
    };
    target.draw_shape(shape, color);
}

fn draw_overlay<T: RenderTarget + ?Sized>(state: &GameState, overlay: &DebugOverlay, target: &mut T) {
    let bottom = state.bounds.height - 20.0;
    let lines = [
        format!("Speed x{:.1}", state.difficulty),
        format!("Weather: {}", state.weather.mode.as_str()),
        format!("FPS: {}", overlay.fps.round() as u32),
    ];
    for (i, line) in lines.iter().enumerate() {
        let y = bottom - (lines.len() - 1 - i) as f32 * 24.0;
        target.draw_text(line, Vec2::new(10.0, y), 20.0, palette::DEBUG_TEXT);
    }
}
