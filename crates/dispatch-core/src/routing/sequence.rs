use crate::geo::haversine_miles;
use crate::model::{Coordinates, Job};

/// A job paired with its geocoding result.
#[derive(Debug, Clone, Copy)]
pub struct Stop<'a> {
    pub job: &'a Job,
    pub coordinates: Option<Coordinates>,
}

/// Sort key for a slot label: its leading hour, with 1 through 7 read as
/// afternoon. Labels without a number sort last.
pub fn slot_sort_key(label: Option<&str>) -> u32 {
    let Some(label) = label else {
        return u32::MAX;
    };
    let digits: String = label
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    match digits.parse::<u32>() {
        Ok(hour @ 1..=7) => hour + 12,
        Ok(hour) => hour,
        Err(_) => u32::MAX,
    }
}

/// Group stop indices by slot label, groups in chronological order.
/// Groups with the same key keep first-appearance order.
pub fn group_by_slot<'a>(stops: &[Stop<'a>]) -> Vec<(Option<&'a str>, Vec<usize>)> {
    let mut groups: Vec<(Option<&'a str>, Vec<usize>)> = Vec::new();
    for (idx, stop) in stops.iter().enumerate() {
        let label = stop.job.slot_label();
        match groups.iter_mut().find(|(l, _)| *l == label) {
            Some((_, members)) => members.push(idx),
            None => groups.push((label, vec![idx])),
        }
    }
    groups.sort_by_key(|(label, _)| slot_sort_key(*label));
    groups
}

/// Greedy nearest-neighbour tour over `points`, starting at the first.
///
/// Returns positions into `points`. Ties go to the earlier point. Never
/// backtracks; O(n²).
pub fn nearest_neighbor(points: &[Coordinates]) -> Vec<usize> {
    if points.is_empty() {
        return Vec::new();
    }

    let mut visited = vec![false; points.len()];
    let mut order = Vec::with_capacity(points.len());
    let mut current = 0;
    visited[0] = true;
    order.push(0);

    while order.len() < points.len() {
        let mut best: Option<(usize, f64)> = None;
        for (i, p) in points.iter().enumerate() {
            if visited[i] {
                continue;
            }
            let d = haversine_miles(points[current], *p);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        let Some((next, _)) = best else { break };
        visited[next] = true;
        order.push(next);
        current = next;
    }

    order
}

/// Visiting order for a rep's day, as indices into `stops`.
///
/// Slot groups run chronologically. Inside a group the geocoded stops are
/// toured nearest-neighbour from the first of them, then the stops that
/// could not be located follow in their original order.
pub fn sequence(stops: &[Stop<'_>]) -> Vec<usize> {
    let mut order = Vec::with_capacity(stops.len());

    for (_, members) in group_by_slot(stops) {
        let (located, unlocated): (Vec<usize>, Vec<usize>) = members
            .iter()
            .partition(|&&i| stops[i].coordinates.is_some());

        let points: Vec<Coordinates> = located
            .iter()
            .filter_map(|&i| stops[i].coordinates)
            .collect();
        order.extend(nearest_neighbor(&points).into_iter().map(|pos| located[pos]));
        order.extend(unlocated);
    }

    order
}

/// Reorder jobs into visiting order. `coordinates` runs parallel to `jobs`;
/// missing entries count as not located.
pub fn sequence_jobs<'a>(jobs: &'a [Job], coordinates: &[Option<Coordinates>]) -> Vec<&'a Job> {
    let stops: Vec<Stop<'a>> = jobs
        .iter()
        .enumerate()
        .map(|(i, job)| Stop {
            job,
            coordinates: coordinates.get(i).copied().flatten(),
        })
        .collect();
    sequence(&stops).into_iter().map(|i| stops[i].job).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{JobId, JobTags};

    fn job(n: usize, slot: Option<&str>) -> Job {
        Job {
            id: JobId::from_line(n, "test"),
            address: format!("{n} Test St"),
            original_address: None,
            city: "MESA".into(),
            zip_code: None,
            notes: String::new(),
            tags: JobTags::default(),
            original_timeframe: None,
            time_slot_label: slot.map(str::to_string),
            assigned_rep: None,
        }
    }

    #[test]
    fn test_slot_sort_key_afternoon_shift() {
        assert_eq!(slot_sort_key(Some("8am-10am")), 8);
        assert_eq!(slot_sort_key(Some("12pm-2pm")), 12);
        assert_eq!(slot_sort_key(Some("1pm-3pm")), 13);
        assert_eq!(slot_sort_key(Some("Slot 3pm")), 15);
        assert_eq!(slot_sort_key(Some("Anytime")), u32::MAX);
        assert_eq!(slot_sort_key(None), u32::MAX);
    }

    #[test]
    fn test_nearest_neighbor_visits_closer_first() {
        let pts = [
            Coordinates::new(0.0, 0.0),
            Coordinates::new(10.0, 0.0),
            Coordinates::new(1.0, 0.0),
        ];
        assert_eq!(nearest_neighbor(&pts), vec![0, 2, 1]);
    }

    #[test]
    fn test_nearest_neighbor_empty_and_single() {
        assert!(nearest_neighbor(&[]).is_empty());
        assert_eq!(nearest_neighbor(&[Coordinates::new(1.0, 1.0)]), vec![0]);
    }

    #[test]
    fn test_groups_ordered_chronologically() {
        let jobs = [
            job(1, Some("1pm-3pm")),
            job(2, Some("Anytime")),
            job(3, Some("10am-12pm")),
            job(4, Some("1pm-3pm")),
        ];
        let coords = vec![None; 4];
        let order: Vec<_> = sequence_jobs(&jobs, &coords)
            .into_iter()
            .map(|j| j.address.clone())
            .collect();
        assert_eq!(order, vec!["3 Test St", "1 Test St", "4 Test St", "2 Test St"]);
    }

    #[test]
    fn test_unlocated_appended_after_tour() {
        let jobs = [
            job(1, Some("8am-10am")),
            job(2, Some("8am-10am")),
            job(3, Some("8am-10am")),
            job(4, Some("8am-10am")),
        ];
        let coords = vec![
            Some(Coordinates::new(0.0, 0.0)),
            None,
            Some(Coordinates::new(10.0, 0.0)),
            Some(Coordinates::new(1.0, 0.0)),
        ];
        let order: Vec<_> = sequence_jobs(&jobs, &coords)
            .into_iter()
            .map(|j| j.address.clone())
            .collect();
        assert_eq!(order, vec!["1 Test St", "4 Test St", "3 Test St", "2 Test St"]);
    }

    #[test]
    fn test_sequence_returns_same_job_references() {
        let jobs = [job(1, None), job(2, None)];
        let ordered = sequence_jobs(&jobs, &[]);
        assert!(std::ptr::eq(ordered[0], &jobs[0]));
        assert!(std::ptr::eq(ordered[1], &jobs[1]));
    }
}
