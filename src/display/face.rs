//! Analog clock face geometry and a character-grid dial.
//!
//! Angles are in degrees, clockwise from 12 o'clock. Screen coordinates grow
//! right and down.

use chrono::{NaiveTime, Timelike};

use crate::common::constants::DIAL_RADIUS;

/// Hand angles for one time of day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    /// Moves continuously with the minutes.
    pub hour: f64,
    /// Moves continuously with the seconds.
    pub minute: f64,
    /// Jumps once per second.
    pub second: f64,
}

pub fn hand_angles(time: NaiveTime) -> HandAngles {
    let hours = f64::from(time.hour() % 12);
    let minutes = f64::from(time.minute());
    let seconds = f64::from(time.second());

    HandAngles {
        hour: hours * 30.0 + minutes * 0.5,
        minute: minutes * 6.0 + seconds * 0.1,
        second: seconds * 6.0,
    }
}

/// Tip of a hand of `length` starting at `center` and pointing at `angle`.
pub fn hand_endpoint(center: (f64, f64), length: f64, angle: f64) -> (f64, f64) {
    let radians = angle.to_radians();
    (
        center.0 + length * radians.sin(),
        center.1 - length * radians.cos(),
    )
}

const HOUR_MARK: char = '•';
const HOUR_HAND: char = '#';
const MINUTE_HAND: char = '*';
const SECOND_HAND: char = '.';
const PIVOT: char = '+';

/// Terminal cells are about twice as tall as wide.
const CELL_ASPECT: f64 = 2.0;

/// Draw the dial for `time` as lines of `4r+1` characters, `2r+1` lines tall.
pub fn render_dial(time: NaiveTime, show_seconds: bool) -> Vec<String> {
    let radius = DIAL_RADIUS;
    let mut grid = Dial::new(radius);
    let r = f64::from(radius);

    for hour in 0..12 {
        grid.plot(hand_endpoint((0.0, 0.0), r, f64::from(hour) * 30.0), HOUR_MARK);
    }

    let angles = hand_angles(time);
    if show_seconds {
        grid.draw_hand(r * 0.9, angles.second, SECOND_HAND);
    }
    grid.draw_hand(r * 0.8, angles.minute, MINUTE_HAND);
    grid.draw_hand(r * 0.5, angles.hour, HOUR_HAND);
    grid.plot((0.0, 0.0), PIVOT);

    grid.into_lines()
}

struct Dial {
    radius: i32,
    cells: Vec<Vec<char>>,
}

impl Dial {
    fn new(radius: i32) -> Self {
        let rows = (2 * radius + 1) as usize;
        let cols = (4 * radius + 1) as usize;
        Self {
            radius,
            cells: vec![vec![' '; cols]; rows],
        }
    }

    /// Plot a point given relative to the pivot in row units.
    fn plot(&mut self, (x, y): (f64, f64), ch: char) {
        let col = (x * CELL_ASPECT).round() as i64 + i64::from(2 * self.radius);
        let row = y.round() as i64 + i64::from(self.radius);

        if let Some(cell) = usize::try_from(row)
            .ok()
            .and_then(|row| self.cells.get_mut(row))
            .and_then(|line| usize::try_from(col).ok().and_then(|col| line.get_mut(col)))
        {
            *cell = ch;
        }
    }

    fn draw_hand(&mut self, length: f64, angle: f64, ch: char) {
        let steps = (length * 4.0).ceil() as usize;
        for step in 1..=steps {
            let t = step as f64 / steps as f64;
            self.plot(hand_endpoint((0.0, 0.0), length * t, angle), ch);
        }
    }

    fn into_lines(self) -> Vec<String> {
        self.cells
            .into_iter()
            .map(|line| line.into_iter().collect::<String>().trim_end().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn test_hand_angles() {
        assert_eq!(
            hand_angles(time(3, 0, 0)),
            HandAngles {
                hour: 90.0,
                minute: 0.0,
                second: 0.0
            }
        );

        let angles = hand_angles(time(18, 30, 15));
        assert_eq!(angles.hour, 195.0);
        assert_eq!(angles.minute, 181.5);
        assert_eq!(angles.second, 90.0);
    }

    #[test]
    fn test_hour_hand_wraps_at_noon() {
        assert_eq!(hand_angles(time(0, 0, 0)).hour, 0.0);
        assert_eq!(hand_angles(time(12, 0, 0)).hour, 0.0);
        assert_eq!(hand_angles(time(23, 59, 0)).hour, 359.5);
    }

    #[test]
    fn test_hand_endpoint_directions() {
        assert!(close(hand_endpoint((0.0, 0.0), 1.0, 0.0), (0.0, -1.0)));
        assert!(close(hand_endpoint((0.0, 0.0), 1.0, 90.0), (1.0, 0.0)));
        assert!(close(hand_endpoint((5.0, 5.0), 2.0, 180.0), (5.0, 7.0)));
        assert!(close(hand_endpoint((0.0, 0.0), 1.0, 270.0), (-1.0, 0.0)));
    }

    #[test]
    fn test_dial_dimensions() {
        let lines = render_dial(time(10, 10, 30), true);
        assert_eq!(lines.len(), (2 * DIAL_RADIUS + 1) as usize);
        assert!(
            lines
                .iter()
                .all(|l| l.chars().count() <= (4 * DIAL_RADIUS + 1) as usize)
        );
    }

    #[test]
    fn test_dial_at_three_oclock() {
        let lines = render_dial(time(3, 0, 0), false);
        let grid: Vec<Vec<char>> = lines.iter().map(|l| l.chars().collect()).collect();
        let center = DIAL_RADIUS as usize;
        let center_col = 2 * DIAL_RADIUS as usize;

        assert_eq!(grid[center][center_col], PIVOT);
        // Hour hand points right, minute hand points up
        assert_eq!(grid[center][center_col + 2], HOUR_HAND);
        assert_eq!(grid[center - 2][center_col], MINUTE_HAND);
        // 12 o'clock mark sits on the top row
        assert_eq!(grid[0][center_col], HOUR_MARK);
        assert!(!lines.iter().any(|l| l.contains(SECOND_HAND)));
    }

    #[test]
    fn test_seconds_hand_drawn_when_enabled() {
        let lines = render_dial(time(3, 0, 30), true);
        assert!(lines.iter().any(|l| l.contains(SECOND_HAND)));
    }
}
