//! Integration tests for vk-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{AgentFrameRow, StepSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn frame_row(agent_id: u32, step: u64) -> AgentFrameRow {
        AgentFrameRow {
            step,
            agent_id,
            x:  agent_id as f64 + 0.5,
            y:  2.0,
            hx: 1.0,
            hy: 0.0,
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("positions.csv").exists());
        assert!(dir.path().join("steps.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("positions.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["step", "agent_id", "x", "y", "hx", "hy"]);

        let mut rdr2 = csv::Reader::from_path(dir.path().join("steps.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, ["step", "sim_time", "neighbor_links"]);
    }

    #[test]
    fn csv_frame_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_frame(&[frame_row(0, 5), frame_row(1, 5), frame_row(2, 5)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("positions.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "5");   // step
        assert_eq!(&rows[0][1], "0");   // agent_id
        assert_eq!(&rows[1][2], "1.5"); // x
        assert_eq!(&rows[2][1], "2");
    }

    #[test]
    fn csv_step_summary_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_step_summary(&StepSummaryRow { step: 3, sim_time: 0.75, neighbor_links: 12 })
            .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("steps.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][1], "0.75");
        assert_eq!(&rows[0][2], "12");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_frame_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_frame(&[]).unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use vk_core::VicsekConfig;
    use vk_sim::{NoopObserver, SimBuilder};

    use crate::{CsvWriter, SimOutputObserver, write_output};

    fn config() -> VicsekConfig {
        VicsekConfig {
            agents:          4,
            steps:           6,
            seed:            1,
            output_interval: 2,
            ..Default::default()
        }
    }

    #[test]
    fn integration_csv_streaming() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer, &cfg);
        let output = SimBuilder::new(cfg).build().unwrap().run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        // Frames 0, 2, 4 → 3 frames × 4 agents.
        let mut rdr = csv::Reader::from_path(dir.path().join("positions.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 12);
        let x: f64 = rows[8][2].parse().unwrap();
        let want = output.positions.frame(4).unwrap()[0].x;
        assert_eq!(&rows[8][0], "4");
        assert_eq!(x, want);

        // One summary per computed step.
        let mut rdr = csv::Reader::from_path(dir.path().join("steps.csv")).unwrap();
        assert_eq!(rdr.records().count(), 5);
    }

    #[test]
    fn batch_export_writes_every_frame() {
        let dir = tempfile::tempdir().unwrap();
        let output = SimBuilder::new(config()).build().unwrap().run(&mut NoopObserver).unwrap();
        let mut writer = CsvWriter::new(dir.path()).unwrap();
        write_output(&output, &mut writer).unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("positions.csv")).unwrap();
        assert_eq!(rdr.records().count(), 6 * 4);
    }
}

#[cfg(test)]
mod tail_tests {
    use vk_core::{FrameSeries, Vec2};

    use crate::{OutputError, TailLayer, TailPlan, write_tail_csv};

    /// 6 frames of one agent at x = frame index.
    fn trajectory() -> FrameSeries {
        let mut t = FrameSeries::with_capacity(1, 6);
        for i in 0..6 {
            t.push_frame(&[Vec2::new(i as f64, 0.0)]);
        }
        t
    }

    #[test]
    fn rejects_bad_windows() {
        assert!(matches!(TailPlan::new(10, 0, 5), Err(OutputError::Tail(_))));
        assert!(TailPlan::new(10, 6, 5).is_err());
        assert!(TailPlan::new(4, 2, 5).is_err());
        assert!(TailPlan::new(5, 5, 5).is_ok());
    }

    #[test]
    fn layers_fade_linearly() {
        let plan = TailPlan::new(30, 4, 30).unwrap();
        assert_eq!(plan.animation_frames(), 26);
        assert_eq!(plan.head(0), 4);
        let layers: Vec<_> = plan.layers(0).collect();
        assert_eq!(
            layers,
            [
                TailLayer { frame: 4, alpha: 1.0 },
                TailLayer { frame: 3, alpha: 0.75 },
                TailLayer { frame: 2, alpha: 0.5 },
                TailLayer { frame: 1, alpha: 0.25 },
            ]
        );
    }

    #[test]
    fn animate_resolves_frames() {
        let traj = trajectory();
        let plan = TailPlan::new(traj.len(), 2, 6).unwrap();
        let frames = plan.animate(&traj).unwrap();
        assert_eq!(frames.len(), 4);
        let last = &frames[3];
        assert_eq!(last.head[0].x, 5.0);
        assert_eq!(last.trail.len(), 2);
        assert_eq!(last.trail[1].0[0].x, 4.0);
        assert_eq!(last.trail[1].1, 0.5);
    }

    #[test]
    fn tail_csv_row_count() {
        let dir = tempfile::tempdir().unwrap();
        let traj = trajectory();
        let plan = TailPlan::new(traj.len(), 3, 5).unwrap();
        write_tail_csv(dir.path(), &plan, &traj).unwrap();

        // 2 animation frames × 3 layers × 1 agent.
        let mut rdr = csv::Reader::from_path(dir.path().join("tail.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 6);
        assert_eq!(&rows[0][2], "3"); // source_frame of anim 0, layer 0
        assert_eq!(&rows[5][2], "2"); // anim 1, layer 2
    }
}
