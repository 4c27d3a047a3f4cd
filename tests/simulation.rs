use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;

use lifegrid::config::Config;
use lifegrid::engine;
use lifegrid::grid::Grid;
use lifegrid::history::HISTORY_LEN;
use lifegrid::history::Stagnation;
use lifegrid::history::Verdict;
use lifegrid::simulation::Edit;
use lifegrid::simulation::Ignored;
use lifegrid::simulation::Simulation;
use lifegrid::simulation::Snapshot;
use lifegrid::stepper::RunState;

fn sim_with(cells: &[(i32, i32)]) -> anyhow::Result<Simulation> {
    let mut sim = Simulation::new(Config::default())?;

    for &(row, col) in cells {
        assert_eq!(sim.paint_cell(row, col), Edit::Applied);
    }

    Ok(sim)
}

#[test]
fn blinker_halts_after_two_ticks() -> anyhow::Result<()> {
    let mut sim = sim_with(&[(10, 9), (10, 10), (10, 11)])?;
    let horizontal = sim.grid().clone();
    let vertical = engine::step(&horizontal);

    let tick = sim.config().tick;
    let t0 = Instant::now();
    assert!(sim.start(t0));

    assert_eq!(sim.poll(t0 + tick / 2), None);

    assert_eq!(sim.poll(t0 + tick), Some(Verdict::Accept));
    assert_eq!(sim.grid(), &vertical);
    assert_eq!(sim.generation(), 1);

    assert_eq!(
        sim.poll(t0 + tick * 2),
        Some(Verdict::Halt(Stagnation::Oscillation))
    );
    assert_eq!(sim.state(), RunState::Idle);
    assert_eq!(sim.stagnation(), Some(Stagnation::Oscillation));

    // The repeated phase was thrown away
    assert_eq!(sim.grid(), &vertical);
    assert_eq!(sim.generation(), 1);

    // Nothing is left scheduled
    assert_eq!(sim.next_deadline(), None);
    assert_eq!(sim.poll(t0 + tick * 10), None);

    Ok(())
}

#[test]
fn block_halts_on_first_tick() -> anyhow::Result<()> {
    let mut sim = sim_with(&[(0, 0), (0, 1), (1, 0), (1, 1)])?;
    let block = sim.grid().clone();

    let t0 = Instant::now();
    sim.start(t0);

    assert_eq!(
        sim.poll(t0 + sim.config().tick),
        Some(Verdict::Halt(Stagnation::StillLife))
    );
    assert_eq!(sim.grid(), &block);
    assert_eq!(sim.generation(), 0);
    assert!(!sim.is_running());

    Ok(())
}

#[test]
fn empty_grid_halts_on_first_tick() -> anyhow::Result<()> {
    let mut sim = sim_with(&[])?;
    let t0 = Instant::now();
    sim.start(t0);

    assert_eq!(
        sim.poll(t0 + sim.config().tick),
        Some(Verdict::Halt(Stagnation::StillLife))
    );
    assert!(sim.grid().is_empty());

    Ok(())
}

#[test]
fn lone_cell_dies_then_halts() -> anyhow::Result<()> {
    let mut sim = sim_with(&[(15, 15)])?;
    let tick = sim.config().tick;
    let t0 = Instant::now();
    sim.start(t0);

    assert_eq!(sim.poll(t0 + tick), Some(Verdict::Accept));
    assert!(sim.grid().is_empty());

    assert_eq!(
        sim.poll(t0 + tick * 2),
        Some(Verdict::Halt(Stagnation::StillLife))
    );

    Ok(())
}

#[test]
fn stop_cancels_the_pending_tick() -> anyhow::Result<()> {
    let mut sim = sim_with(&[(10, 9), (10, 10), (10, 11)])?;
    let before = sim.grid().clone();
    let t0 = Instant::now();

    sim.start(t0);
    assert!(sim.stop());

    assert_eq!(sim.next_deadline(), None);
    assert_eq!(sim.poll(t0 + sim.config().tick * 5), None);
    assert_eq!(sim.grid(), &before);

    // A clear after stopping can't be undone by a late tick
    assert_eq!(sim.clear(), Edit::Applied);
    assert_eq!(sim.poll(t0 + sim.config().tick * 6), None);
    assert!(sim.grid().is_empty());

    Ok(())
}

#[test]
fn toggles_while_running_change_nothing() -> anyhow::Result<()> {
    let mut sim = sim_with(&[(10, 9), (10, 10), (10, 11)])?;
    let before = sim.grid().clone();
    sim.start(Instant::now());

    for row in -1..=30 {
        for col in [-1, 0, 10, 29, 30] {
            assert_eq!(sim.toggle_cell(row, col), Edit::Ignored(Ignored::Running));
        }
    }

    assert_eq!(sim.grid(), &before);

    Ok(())
}

#[test]
fn randomize_toggle_step_never_panics() -> anyhow::Result<()> {
    let mut sim = Simulation::new(Config::default())?;
    let mut rng = StdRng::seed_from_u64(0x5eed);

    assert_eq!(sim.randomize_with(&mut rng), Edit::Applied);
    let randomized = sim.grid().clone();

    for (row, col) in [(-1, 0), (30, 0), (0, -1), (0, 30), (i32::MIN, i32::MAX)] {
        assert_eq!(sim.toggle_cell(row, col), Edit::Ignored(Ignored::OutOfBounds));
    }
    assert_eq!(sim.grid(), &randomized);

    let t0 = Instant::now();
    sim.start(t0);
    assert!(sim.poll(t0 + sim.config().tick).is_some());

    Ok(())
}

#[test]
fn history_stays_bounded() -> anyhow::Result<()> {
    let mut sim = Simulation::new(Config::default())?;
    let mut rng = StdRng::seed_from_u64(1234);
    sim.randomize_with(&mut rng);

    let tick = sim.config().tick;
    let t0 = Instant::now();
    sim.start(t0);

    for i in 1..=500 {
        sim.poll(t0 + tick * i);
        assert!(sim.history().len() <= HISTORY_LEN);

        if !sim.is_running() {
            break;
        }
    }

    sim.stop();
    sim.randomize_with(&mut rng);
    assert!(sim.history().is_empty());

    Ok(())
}

#[test]
fn subscribers_see_the_halt() -> anyhow::Result<()> {
    let mut sim = sim_with(&[(10, 9), (10, 10), (10, 11)])?;
    let seen: Rc<RefCell<Vec<Snapshot>>> = Rc::default();

    let log = Rc::clone(&seen);
    sim.subscribe(move |s| log.borrow_mut().push(s.clone()));

    let tick = sim.config().tick;
    let t0 = Instant::now();
    sim.start(t0);
    sim.poll(t0 + tick);
    sim.poll(t0 + tick * 2);

    let seen = seen.borrow();
    let states: Vec<_> = seen.iter().map(|s| (s.state, s.generation)).collect();
    assert_eq!(
        states,
        vec![
            (RunState::Running, 0),
            (RunState::Running, 1),
            (RunState::Idle, 1),
        ]
    );

    let last = seen.last().map(|s| s.stagnation);
    assert_eq!(last, Some(Some(Stagnation::Oscillation)));

    // Snapshots handed out earlier still show what they showed then
    assert_eq!(seen[0].grid.live_count(), 3);
    assert_eq!(seen[0].grid.get(10, 9), Some(true));
    assert_eq!(seen[1].grid.get(10, 9), Some(false));

    Ok(())
}

#[test]
fn restarting_after_a_halt_halts_again() -> anyhow::Result<()> {
    let mut sim = sim_with(&[(10, 9), (10, 10), (10, 11)])?;
    let tick = sim.config().tick;
    let t0 = Instant::now();

    sim.start(t0);
    sim.poll(t0 + tick);
    sim.poll(t0 + tick * 2);
    assert!(!sim.is_running());

    // The history still remembers the other phase
    let t1 = t0 + tick * 3;
    assert!(sim.start(t1));
    assert_eq!(sim.stagnation(), None);
    assert_eq!(
        sim.poll(t1 + tick),
        Some(Verdict::Halt(Stagnation::Oscillation))
    );

    Ok(())
}

#[test]
fn custom_grid() -> anyhow::Result<()> {
    let grid = Grid::from_rows(&["......", ".##...", ".##...", "...##.", "...##.", "......"])?;
    let sim = Simulation::with_grid(Config::default(), grid)?;

    assert_eq!(sim.grid().size(), 6);
    assert_eq!(sim.config().size, 6);

    Ok(())
}
