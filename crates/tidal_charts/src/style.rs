use tidal_paint::Color;

/// Visual styling for the realtime line chart.
#[derive(Clone, Debug, PartialEq)]
pub struct RealtimeChartStyle {
    pub bg: Color,
    pub backdrop: Color,
    pub backdrop_radius: f32,
    /// How far the backdrop extends past the plot rectangle.
    pub backdrop_outset: f32,
    pub grid: Color,
    pub grid_lines: usize,
    pub line: Color,
    pub line_width: f32,
    /// Alpha of the area under the line, relative to `line`.
    pub shadow_alpha: f32,
    /// Fill of the endpoint marker.
    pub pulse: Color,
    pub text: Color,
    pub font_size: f32,
    pub y_ticks: usize,
    pub x_ticks: usize,
    pub y_decimals: usize,
    /// Draw the line as cubic bezier segments.
    pub smooth: bool,
    pub smooth_segments: usize,
    pub pulse_radius: f32,
    pub pulse_halo_alpha: f32,
    pub core_radius: f32,
    pub core_alpha: f32,
}

impl Default for RealtimeChartStyle {
    fn default() -> Self {
        Self {
            bg: Color::from_hex(0x1a1a2e),
            backdrop: Color::from_hex(0x0f0f23).with_alpha(0.8),
            backdrop_radius: 10.0,
            backdrop_outset: 10.0,
            grid: Color::from_hex(0x333333).with_alpha(0.3),
            grid_lines: 10,
            line: Color::from_hex(0x00d2ff).with_alpha(0.9),
            line_width: 1.0,
            shadow_alpha: 0.15,
            pulse: Color::from_hex(0x00d2ff),
            text: Color::WHITE,
            font_size: 10.0,
            y_ticks: 6,
            x_ticks: 6,
            y_decimals: 0,
            smooth: false,
            smooth_segments: 10,
            pulse_radius: 12.0,
            pulse_halo_alpha: 0.3,
            core_radius: 6.0,
            core_alpha: 0.9,
        }
    }
}
