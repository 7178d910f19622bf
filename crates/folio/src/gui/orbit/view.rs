use super::{HUB_RADIUS, RING_WIDTH, SPOKE_WIDTH};
use super::model::OrbitScene;
use crate::gui::theme::ThemeColors;
use cairo::{Context, LinearGradient};
use palette::Srgba;
use std::f64::consts::PI;

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn draw_ring(cr: &Context, scene: &OrbitScene, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let center = scene.center();
    set_color(cr, colors.ring);
    cr.set_line_width(RING_WIDTH);
    cr.set_dash(&[6.0, 6.0], 0.0);
    cr.arc(
        center.x,
        center.y,
        scene.layout.geometry().effective_radius,
        0.0,
        2.0 * PI,
    );
    cr.stroke()?;
    cr.set_dash(&[], 0.0);
    Ok(())
}

fn draw_spoke(cr: &Context, scene: &OrbitScene, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let Some(item) = scene.layout.items().get(scene.selected) else {
        return Ok(());
    };
    let center = scene.center();
    set_color(cr, colors.accent);
    cr.set_line_width(SPOKE_WIDTH);
    cr.move_to(center.x, center.y);
    cr.line_to(center.x + item.x, center.y + item.y);
    cr.stroke()
}

fn draw_hub(cr: &Context, scene: &OrbitScene, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let center = scene.center();
    let gradient = LinearGradient::new(
        center.x - HUB_RADIUS,
        center.y - HUB_RADIUS,
        center.x + HUB_RADIUS,
        center.y + HUB_RADIUS,
    );
    let (r, g, b, a) = colors.hub_start.into_components();
    gradient.add_color_stop_rgba(0.0, r, g, b, a);
    let (r, g, b, a) = colors.hub_end.into_components();
    gradient.add_color_stop_rgba(1.0, r, g, b, a);

    cr.set_source(&gradient)?;
    cr.arc(center.x, center.y, HUB_RADIUS, 0.0, 2.0 * PI);
    cr.fill()?;

    set_color(cr, colors.hub_text);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(13.0);

    let lines = [scene.hub_count_label(), "Experience".to_owned()];
    let line_height = 16.0;
    let top = center.y - line_height * (lines.len() as f64 - 1.0) / 2.0;
    for (i, line) in lines.iter().enumerate() {
        if let Ok(ext) = cr.text_extents(line) {
            cr.move_to(
                center.x - ext.width() / 2.0 - ext.x_bearing(),
                top + i as f64 * line_height + ext.height() / 2.0,
            );
            cr.show_text(line)?;
        }
    }
    Ok(())
}

/// Ring, selection spoke and hub. The item buttons are real widgets placed
/// on top of this drawing.
pub fn draw(cr: &Context, scene: &OrbitScene, colors: &ThemeColors) -> Result<(), cairo::Error> {
    if scene.layout.item_count() == 0 {
        return Ok(());
    }
    draw_ring(cr, scene, colors)?;
    draw_spoke(cr, scene, colors)?;
    draw_hub(cr, scene, colors)
}
