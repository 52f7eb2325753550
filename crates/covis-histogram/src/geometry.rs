//! Bar geometry under a linear or logarithmic X scale

use crate::config::{HistogramConfig, ScaleMode};
use crate::range::{screen_factor, RangeX};
use crate::types::{HistogramBar, HistogramData};

/// Map every bar to axis and screen coordinates
///
/// `range` must come from [`compute_range_x`](crate::compute_range_x) over the
/// same bars. Under the logarithmic scale, bars touching or straddling zero
/// are drawn in the reserved gap and take the gap color.
pub fn compute_bar_geometry(
    bars: &[HistogramData],
    range: &RangeX,
    scale: ScaleMode,
    container_width: f64,
    config: &HistogramConfig,
) -> Vec<HistogramBar> {
    let factor = screen_factor(range.width(scale), container_width);
    bars.iter()
        .map(|bar| {
            let [lower, upper] = bar.partition;
            let lin_x = lower - range.lin.min;
            let lin_w = upper - lower;
            let log_x = range.log.position(lower);
            let log_w = range.log.position(upper) - log_x;
            let (axis_x, axis_w) = match scale {
                ScaleMode::Linear => (lin_x, lin_w),
                ScaleMode::Logarithmic => (log_x, log_w),
            };
            let in_gap = scale == ScaleMode::Logarithmic
                && range.log.middle_width > 0.0
                && bar.touches_zero();
            HistogramBar {
                partition: bar.partition,
                lin_x,
                lin_w,
                log_x,
                log_w,
                x: axis_x * factor,
                width: axis_w * factor,
                color: if in_gap {
                    config.gap_color.clone()
                } else {
                    config.bar_color.clone()
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::compute_range_x;
    use approx::assert_relative_eq;

    fn bars(bounds: &[f64]) -> Vec<HistogramData> {
        bounds
            .windows(2)
            .map(|w| HistogramData::new([w[0], w[1]], 1.0, 10.0))
            .collect()
    }

    #[test]
    fn test_linear_geometry() {
        let config = HistogramConfig::default();
        let data = bars(&[2.0, 4.0, 10.0]);
        let range = compute_range_x(&data, &config);
        let geometry = compute_bar_geometry(&data, &range, ScaleMode::Linear, 80.0, &config);
        assert_eq!(geometry.len(), 2);
        assert_relative_eq!(geometry[0].x, 0.0);
        assert_relative_eq!(geometry[0].width, 20.0);
        assert_relative_eq!(geometry[1].x, 20.0);
        assert_relative_eq!(geometry[1].width, 60.0);
        assert_eq!(geometry[1].lin_w, 6.0);
        assert!(geometry.iter().all(|b| b.color == config.bar_color));
    }

    #[test]
    fn test_log_geometry_with_straddling_bar() {
        let config = HistogramConfig::default();
        let data = bars(&[-100.0, -10.0, -1.0, 1.0, 10.0, 1000.0]);
        let range = compute_range_x(&data, &config);
        let geometry = compute_bar_geometry(&data, &range, ScaleMode::Logarithmic, 620.0, &config);

        let xs: Vec<f64> = geometry.iter().map(|b| b.x).collect();
        let widths: Vec<f64> = geometry.iter().map(|b| b.width).collect();
        for (actual, expected) in xs.iter().zip([0.0, 100.0, 200.0, 320.0, 420.0]) {
            assert_relative_eq!(*actual, expected, epsilon = 1e-9);
        }
        for (actual, expected) in widths.iter().zip([100.0, 100.0, 120.0, 100.0, 200.0]) {
            assert_relative_eq!(*actual, expected, epsilon = 1e-9);
        }
        assert_eq!(geometry[2].color, config.gap_color);
        assert_eq!(geometry[1].color, config.bar_color);

        // Linear coordinates are kept alongside
        assert_eq!(geometry[2].lin_x, 99.0);
        assert_eq!(geometry[2].lin_w, 2.0);
    }

    #[test]
    fn test_bars_tile_the_log_axis() {
        let config = HistogramConfig::default().with_middle_width(2.0);
        let data = bars(&[-5.0, -0.5, 0.0, 0.25, 3.0, 40.0]);
        let range = compute_range_x(&data, &config);
        let geometry = compute_bar_geometry(&data, &range, ScaleMode::Logarithmic, 500.0, &config);
        for pair in geometry.windows(2) {
            assert_relative_eq!(pair[0].x + pair[0].width, pair[1].x, epsilon = 1e-9);
        }
        let last = geometry.last().unwrap();
        assert_relative_eq!(last.x + last.width, 500.0, epsilon = 1e-9);
        assert!(geometry.iter().all(|b| b.width >= 0.0));
    }

    #[test]
    fn test_degenerate_axis() {
        let config = HistogramConfig::default();
        let data = bars(&[3.0, 3.0]);
        let range = compute_range_x(&data, &config);
        let geometry = compute_bar_geometry(&data, &range, ScaleMode::Linear, 100.0, &config);
        assert_eq!(geometry[0].x, 0.0);
        assert_eq!(geometry[0].width, 0.0);
    }
}
