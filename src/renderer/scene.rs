//! Per-day drawing inside the game card

use std::f64::consts::PI;

use super::{Surface, colors};
use crate::sim::{ActiveScreen, Catch, Drive, Shield, ShieldPhase, TRIP_LENGTH};

pub fn draw_screen(surface: &Surface, screen: &ActiveScreen, time: f64) {
    surface.clear();
    match screen {
        ActiveScreen::Shield(s) => draw_shield(surface, s),
        ActiveScreen::Catch(c) => draw_catch(surface, c),
        ActiveScreen::Drive(d) => draw_drive(surface, d, time),
        // Days 1, 5 and 6 are DOM only
        ActiveScreen::Reaction(_) | ActiveScreen::Scratch(_) | ActiveScreen::Proposal(_) => {}
    }
}

fn draw_shield(surface: &Surface, shield: &Shield) {
    let ctx = surface.ctx();
    let (w, h) = surface.size();
    let (cx, cy) = (w / 2.0, h / 2.0);

    let glow = ctx
        .create_radial_gradient(cx, cy, 0.0, cx, cy, w.max(h) / 2.0)
        .ok();
    if let Some(glow) = glow {
        glow.add_color_stop(0.0, colors::IVORY).ok();
        glow.add_color_stop(1.0, "#f0f0f0").ok();
        ctx.set_fill_style_canvas_gradient(&glow);
        ctx.fill_rect(0.0, 0.0, w, h);
    }

    surface.glyph("👶", cx, cy, 40.0);

    if matches!(shield.phase(), ShieldPhase::Intro | ShieldPhase::Playing { .. }) {
        let band = shield.shield();
        let start = ((band.center_deg - band.half_width_deg) as f64).to_radians();
        let end = ((band.center_deg + band.half_width_deg) as f64).to_radians();
        ctx.begin_path();
        ctx.arc(cx, cy, band.radius as f64, start, end).ok();
        ctx.set_stroke_style_str(colors::EUCALYPTUS);
        ctx.set_line_width((band.half_thickness * 2.0) as f64);
        ctx.set_line_cap("round");
        ctx.stroke();
    }

    for enemy in shield.enemies() {
        surface.glyph(
            "🌧️",
            cx + enemy.pos.x as f64,
            cy + enemy.pos.y as f64,
            30.0,
        );
    }
}

fn draw_catch(surface: &Surface, game: &Catch) {
    let ctx = surface.ctx();
    let (w, h) = surface.size();

    let wash = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
    wash.add_color_stop(0.0, "#f0f0f0").ok();
    wash.add_color_stop(1.0, "#e0e0e0").ok();
    ctx.set_fill_style_canvas_gradient(&wash);
    ctx.fill_rect(0.0, 0.0, w, h);

    for item in game.items() {
        surface.glyph(
            item.kind.emoji(),
            item.x as f64 / 100.0 * w,
            item.y as f64 / 100.0 * h,
            24.0,
        );
    }

    surface.glyph("🍽️", game.catcher_x() as f64 / 100.0 * w, h * 0.95 - 20.0, 40.0);
}

fn draw_drive(surface: &Surface, drive: &Drive, time: f64) {
    let ctx = surface.ctx();
    let (w, h) = surface.size();

    ctx.set_fill_style_str(colors::NIGHT);
    ctx.fill_rect(0.0, 0.0, w, h);

    // Fixed stars
    ctx.set_fill_style_str("white");
    for i in 0..24u32 {
        let sx = ((i * 97) % 100) as f64 / 100.0 * w;
        let sy = ((i * 53) % 50) as f64 / 100.0 * h;
        ctx.fill_rect(sx, sy, 2.0, 2.0);
    }

    // City skyline scrolls with distance
    let scroll = (drive.distance() / TRIP_LENGTH) as f64 * w;
    ctx.set_fill_style_str("#1c1c2e");
    for i in 0..16u32 {
        let bw = 40.0 + ((i * 31) % 30) as f64;
        let bh = 30.0 + ((i * 17) % 60) as f64;
        let bx = (i as f64 * 60.0 - scroll).rem_euclid(w * 2.0) - 60.0;
        ctx.fill_rect(bx, h - 40.0 - bh, bw, bh);
    }

    // Road with dashes
    ctx.set_fill_style_str(colors::ROAD);
    ctx.fill_rect(0.0, h - 40.0, w, 40.0);
    ctx.set_fill_style_str("white");
    let dash_shift = (drive.distance() as f64 * 40.0).rem_euclid(40.0);
    let mut x = -dash_shift;
    while x < w {
        ctx.fill_rect(x, h - 21.0, 20.0, 2.0);
        x += 40.0;
    }

    // Car with an idle bounce
    let bounce = (time / 100.0).sin() * 2.0;
    surface.glyph("🚗", w * 0.2, h - 55.0 + bounce, 48.0);

    // Progress bar
    ctx.set_fill_style_str(colors::PEACH);
    ctx.fill_rect(0.0, 0.0, w * (drive.distance() / TRIP_LENGTH) as f64, 4.0);

    if drive.throttle() {
        ctx.set_global_alpha(0.3);
        ctx.begin_path();
        ctx.arc(w * 0.2 + 30.0, h - 55.0, 12.0, 0.0, 2.0 * PI).ok();
        ctx.set_fill_style_str("#ffe9a0");
        ctx.fill();
        ctx.set_global_alpha(1.0);
    }
}
