//! Background hearts and confetti

use std::f64::consts::PI;

use super::{Surface, colors};
use crate::background::Backdrop;
use crate::sim::Confetti;

/// Gradient wash with drifting hearts
pub fn draw_backdrop(surface: &Surface, backdrop: &Backdrop, limit: usize) {
    let ctx = surface.ctx();
    let (w, h) = surface.size();

    let gradient = ctx.create_linear_gradient(0.0, 0.0, w, h);
    gradient.add_color_stop(0.0, colors::IVORY).ok();
    gradient.add_color_stop(1.0, colors::PEACH).ok();
    ctx.set_fill_style_canvas_gradient(&gradient);
    ctx.fill_rect(0.0, 0.0, w, h);

    for (heart, pose) in backdrop.poses(limit) {
        let x = heart.anchor.x as f64 / 100.0 * w + pose.offset.x as f64;
        let y = heart.anchor.y as f64 / 100.0 * h + pose.offset.y as f64;
        ctx.save();
        ctx.set_global_alpha(pose.opacity as f64);
        ctx.translate(x, y).ok();
        ctx.rotate((pose.rotation_deg as f64).to_radians()).ok();
        heart_path(surface, heart.size as f64);
        ctx.set_fill_style_str("rgba(220, 162, 120, 1)");
        ctx.fill();
        ctx.restore();
    }

    // Soft white fade at the bottom
    let fade = ctx.create_linear_gradient(0.0, h, 0.0, h - 200.0);
    fade.add_color_stop(0.0, "rgba(255,255,255,0.8)").ok();
    fade.add_color_stop(1.0, "rgba(255,255,255,0)").ok();
    ctx.set_fill_style_canvas_gradient(&fade);
    ctx.fill_rect(0.0, h - 200.0, w, 200.0);
}

/// Heart outline centered on the origin
fn heart_path(surface: &Surface, size: f64) {
    let ctx = surface.ctx();
    let s = size / 2.0;
    ctx.begin_path();
    ctx.move_to(0.0, s * 0.9);
    ctx.bezier_curve_to(-s * 1.2, 0.0, -s * 0.6, -s * 1.0, 0.0, -s * 0.35);
    ctx.bezier_curve_to(s * 0.6, -s * 1.0, s * 1.2, 0.0, 0.0, s * 0.9);
    ctx.close_path();
}

/// Paper confetti over the whole viewport
pub fn draw_confetti(surface: &Surface, confetti: &Confetti) {
    let ctx = surface.ctx();
    let (w, h) = surface.size();
    for p in confetti.particles() {
        let x = p.pos.x as f64 * w;
        let y = p.pos.y as f64 * h;
        if y > h + 20.0 {
            continue;
        }
        let size = p.size as f64;
        // Flip around the horizontal axis to fake a tumbling sheet
        let squash = (p.tilt as f64).cos().abs().max(0.15);
        ctx.save();
        ctx.set_global_alpha(p.opacity() as f64);
        ctx.translate(x, y).ok();
        ctx.rotate(p.tilt as f64 * 0.5 % (2.0 * PI)).ok();
        ctx.set_fill_style_str(p.color);
        ctx.fill_rect(-size / 2.0, -size * squash / 2.0, size, size * squash);
        ctx.restore();
    }
}
