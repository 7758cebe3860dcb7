//! ASCII rendering of the road.

use lt_agent::RenderSnapshot;

/// Columns shown past the furthest car.
const MARGIN: u64 = 4;

/// Draw every lane as one row, lane 1 on top.
///
/// Cars are upper-case initials.  With `intents`, each car's projected cell
/// gets its lower-case initial unless a car already occupies it.  Projections
/// off the road are not drawn.
pub fn draw_road(cars: &[RenderSnapshot], num_lanes: u32, intents: bool) -> String {
    let width = cars
        .iter()
        .map(|c| c.projected_cell().0.max(c.position))
        .max()
        .unwrap_or(0)
        + MARGIN;
    let width = usize::try_from(width).unwrap_or(usize::MAX);

    let mut rows = vec![vec!['.'; width]; num_lanes as usize];

    if intents {
        for car in cars {
            let (x, lane) = car.projected_cell();
            if let Some(cell) = cell_mut(&mut rows, x, lane) {
                *cell = initial(car).to_ascii_lowercase();
            }
        }
    }
    for car in cars {
        if let Some(cell) = cell_mut(&mut rows, car.position, car.lane) {
            *cell = initial(car).to_ascii_uppercase();
        }
    }

    let mut out = String::new();
    for (i, row) in rows.iter().enumerate() {
        out.push_str(&format!("{:>2} |", i + 1));
        out.extend(row.iter());
        out.push('\n');
    }
    out
}

fn initial(car: &RenderSnapshot) -> char {
    car.label.chars().next().unwrap_or('?')
}

fn cell_mut(rows: &mut [Vec<char>], x: u64, lane: u32) -> Option<&mut char> {
    let row = rows.get_mut(usize::try_from(lane).ok()?.checked_sub(1)?)?;
    row.get_mut(usize::try_from(x).ok()?)
}

#[cfg(test)]
mod tests {
    use lt_core::{AgentId, Intent};

    use super::*;

    fn car(label: &str, position: u64, lane: u32, intent: Intent) -> RenderSnapshot {
        RenderSnapshot { id: AgentId(0), label: label.into(), position, lane, speed: 2, intent }
    }

    #[test]
    fn cars_drawn_in_their_lane() {
        let road = draw_road(&[car("red", 1, 2, Intent::Hold)], 3, false);
        let lines: Vec<&str> = road.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], " 2 |.R.....");
        assert!(!lines[0].contains('R'));
    }

    #[test]
    fn intent_projection_marks_target_cell() {
        let road = draw_road(&[car("blue", 0, 1, Intent::ShiftDown)], 2, true);
        let lines: Vec<&str> = road.lines().collect();
        assert_eq!(lines[0], " 1 |B.....");
        assert_eq!(lines[1], " 2 |..b...");
    }

    #[test]
    fn off_road_projection_is_skipped() {
        let road = draw_road(&[car("x", 0, 1, Intent::ShiftUp)], 1, true);
        assert_eq!(road, " 1 |X.....\n");
    }
}
