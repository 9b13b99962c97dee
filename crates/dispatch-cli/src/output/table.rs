use dispatch_core::model::Job;
use dispatch_core::OptimizedRoute;

pub fn print_jobs(jobs: &[Job]) {
    if jobs.is_empty() {
        println!("No jobs found.");
        return;
    }

    let max_address = jobs.iter().map(|j| j.address.len()).max().unwrap_or(10);
    let max_city = jobs.iter().map(|j| j.city.len()).max().unwrap_or(4).max(4);

    let mut current_frame: Option<&str> = None;
    for (i, job) in jobs.iter().enumerate() {
        let frame = job.original_timeframe.as_deref();
        if i == 0 || frame != current_frame {
            if i > 0 {
                println!();
            }
            println!("=== {} ===\n", frame.unwrap_or("No time window"));
            current_frame = frame;
        }
        println!(
            "  {:<aw$}  {:<cw$}  {:<5}  {}",
            job.address,
            job.city,
            job.zip_code.as_deref().unwrap_or("-"),
            job.notes,
            aw = max_address,
            cw = max_city,
        );
        if let Some(ref rep) = job.assigned_rep {
            println!("  {:<aw$}  -> {}", "", rep, aw = max_address);
        }
    }
    println!();
    println!("{} job(s)", jobs.len());
}

pub fn print_route(route: &OptimizedRoute) {
    if route.stops.is_empty() {
        println!("No stops to sequence.");
        return;
    }

    println!("Visiting order:\n");
    let mut current_slot: Option<&str> = None;
    for (i, stop) in route.stops.iter().enumerate() {
        let slot = stop.job.slot_label();
        if i == 0 || slot != current_slot {
            println!("  [{}]", slot.unwrap_or("unscheduled"));
            current_slot = slot;
        }
        let located = match stop.coordinates {
            Some(point) => point.to_string(),
            None => "not located".to_string(),
        };
        println!(
            "  {:>3}. {}, {}  ({})",
            i + 1,
            stop.job.address,
            stop.job.city,
            located
        );
    }
    println!();

    match &route.route {
        Some(info) => println!(
            "Route: {:.1} mi, {:.0} min driving ({:.1} mi straight-line)",
            info.distance, info.duration, route.straight_line_miles
        ),
        None => println!("Straight-line distance: {:.1} mi", route.straight_line_miles),
    }

    for notice in &route.notices {
        println!("  note: {notice}");
    }
    for address in &route.failed_addresses {
        println!("  not located: {address}");
    }
}
