use rowmill::testing::*;
use rowmill::{
    ColumnMeta, CsvSettings, Error, Field, FieldKind, FieldValue, FileSink, Record, RenderMode,
    Renderer, Sink, WriterSink,
};
use std::sync::Arc;

struct Event {
    id: u32,
    name: String,
}

impl Record for Event {
    fn fields() -> Vec<Field> {
        vec![
            Field::scalar(ColumnMeta::new(1, "Id"), |e: &Event| e.id),
            Field::scalar(ColumnMeta::new(2, "Name"), |e: &Event| e.name.clone()),
        ]
    }
}

fn events(n: usize) -> Vec<Event> {
    (0..n)
        .map(|i| Event {
            id: i as u32,
            name: format!("event{i}"),
        })
        .collect()
}

#[test]
fn header_appears_exactly_once_below_threshold() -> anyhow::Result<()> {
    let renderer = Renderer::default();
    let mut sink = ChunkSink::new();

    let rows = renderer.render(&events(100), &mut sink)?;

    assert_eq!(rows, 100);
    assert_eq!(sink.call_count(), 1);
    assert_header_once(&sink.concat(), "Id,Name");
    Ok(())
}

#[test]
fn parallel_and_sequential_agree_on_rows() -> anyhow::Result<()> {
    let records = events(257);

    let mut seq = ChunkSink::new();
    Renderer::default()
        .with_mode(RenderMode::Sequential)
        .render(&records, &mut seq)?;

    let mut par = ChunkSink::new();
    Renderer::default()
        .with_mode(RenderMode::Parallel {
            threads: Some(4),
            partitions: Some(8),
        })
        .render(&records, &mut par)?;

    assert_same_rows(&par.concat(), &seq.concat());
    Ok(())
}

#[test]
fn threshold_splits_output_into_multiple_chunks() -> anyhow::Result<()> {
    let renderer = Renderer::default()
        .with_mode(RenderMode::Parallel {
            threads: None,
            partitions: Some(8),
        })
        .with_threshold(50);
    let mut sink = ChunkSink::new();

    let rows = renderer.render(&events(100), &mut sink)?;

    assert_eq!(rows, 100);
    assert!(sink.call_count() > 1);
    let output = sink.concat();
    assert_header_once(&output, "Id,Name");
    assert_eq!(rows_of(&output).len(), 101);
    Ok(())
}

#[test]
fn chunked_output_matches_single_shot_rendering() -> anyhow::Result<()> {
    let records = events(300);

    let mut chunked = ChunkSink::new();
    Renderer::default()
        .with_mode(RenderMode::Parallel {
            threads: None,
            partitions: Some(8),
        })
        .with_threshold(64)
        .render(&records, &mut chunked)?;

    let mut single = ChunkSink::new();
    Renderer::default()
        .with_mode(RenderMode::Sequential)
        .render(&records, &mut single)?;
    assert_eq!(single.call_count(), 1);

    assert!(chunked.call_count() > 1);
    let output = chunked.concat();
    assert_same_rows(&output, &single.concat());
    assert_header_once(&output, "Id,Name");

    // Every drain except the final flush was triggered by the threshold.
    let chunks = chunked.into_chunks();
    assert!(chunks[..chunks.len() - 1].iter().all(|chunk| chunk.len() > 64));
    Ok(())
}

#[test]
fn empty_input_emits_a_single_header_chunk() -> anyhow::Result<()> {
    let renderer = Renderer::default();
    let mut sink = ChunkSink::new();

    let rows = renderer.render(&Vec::<Event>::new(), &mut sink)?;

    assert_eq!(rows, 0);
    assert_eq!(sink.chunks(), ["Id,Name\n"]);
    Ok(())
}

#[test]
fn sequential_mode_also_respects_the_threshold() -> anyhow::Result<()> {
    let renderer = Renderer::default()
        .with_mode(RenderMode::Sequential)
        .with_threshold(40);
    let mut sink = ChunkSink::new();

    renderer.render(&events(50), &mut sink)?;

    assert!(sink.call_count() > 1);
    let output = sink.concat();
    assert_header_once(&output, "Id,Name");
    assert_eq!(rows_of(&output).len(), 51);
    Ok(())
}

#[test]
fn render_to_path_appends_across_calls() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("events.csv");
    let renderer = Renderer::default().with_mode(RenderMode::Sequential);

    renderer.render_to_path(&events(2), &path)?;
    renderer.render_to_path(&events(3), &path)?;

    let written = std::fs::read_to_string(&path)?;
    let rows = rows_of(&written);
    assert_eq!(rows.len(), 7);
    assert_eq!(rows.iter().filter(|row| *row == "Id,Name").count(), 2);
    Ok(())
}

#[test]
fn create_sink_truncates_an_existing_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("events.csv");

    let mut stale = FileSink::create(&path)?;
    stale.accept("stale,line\n")?;
    drop(stale);

    let mut sink = FileSink::create(&path)?;
    Renderer::default()
        .with_mode(RenderMode::Sequential)
        .render(&events(1), &mut sink)?;

    assert_eq!(std::fs::read_to_string(&path)?, "Id,Name\n0,event0\n");
    Ok(())
}

struct Fragile {
    n: i32,
}

impl Record for Fragile {
    fn fields() -> Vec<Field> {
        // Negative values come back as the wrong variant on purpose.
        vec![Field::new(
            Some(ColumnMeta::new(1, "N")),
            FieldKind::Scalar,
            |f: &Fragile| {
                if f.n < 0 {
                    FieldValue::ScalarSeq(Vec::new())
                } else {
                    FieldValue::Scalar(f.n.to_string())
                }
            },
        )]
    }
}

#[test]
fn extraction_failure_still_flushes_buffered_output() {
    let renderer = Renderer::default().with_mode(RenderMode::Sequential);
    let records: Vec<Fragile> = [1, 2, -1, 3].into_iter().map(|n| Fragile { n }).collect();
    let mut sink = ChunkSink::new();

    let err = renderer.render(&records, &mut sink).unwrap_err();

    assert!(matches!(err, Error::Extraction(_)));
    // Rows extracted before the failure were flushed on the way out.
    assert_eq!(sink.concat(), "N\n1\n2\n");
}

#[test]
fn sink_failure_propagates_as_sink_error() {
    let renderer = Renderer::default().with_mode(RenderMode::Sequential);
    let mut sink = FailingSink::after(0);

    let err = renderer.render(&events(3), &mut sink).unwrap_err();
    assert!(matches!(err, Error::Sink(_)));
}

#[test]
fn closures_are_sinks() -> anyhow::Result<()> {
    let renderer = Renderer::default().with_mode(RenderMode::Sequential);
    let mut captured = String::new();

    {
        let mut sink = |chunk: &str| -> anyhow::Result<()> {
            captured.push_str(chunk);
            Ok(())
        };
        renderer.render(&events(2), &mut sink)?;
    }

    assert_eq!(captured, "Id,Name\n0,event0\n1,event1\n");
    Ok(())
}

#[test]
fn writer_sinks_collect_rendered_bytes() -> anyhow::Result<()> {
    let renderer = Renderer::default().with_mode(RenderMode::Sequential);
    let mut sink = WriterSink::new(Vec::<u8>::new());

    renderer.render(&events(2), &mut sink)?;

    assert!(sink.get_ref().starts_with(b"Id,Name\n"));
    assert_eq!(
        String::from_utf8(sink.into_inner())?,
        "Id,Name\n0,event0\n1,event1\n"
    );
    Ok(())
}

#[test]
fn renderer_caches_schemas_across_renders() -> anyhow::Result<()> {
    let renderer = Renderer::default().with_mode(RenderMode::Sequential);
    assert!(renderer.registry().is_empty());

    renderer.render(&events(2), &mut ChunkSink::new())?;
    let first = renderer.registry().get::<Event>()?;

    renderer.render(&events(3), &mut ChunkSink::new())?;
    let second = renderer.registry().get::<Event>()?;

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(renderer.registry().len(), 1);
    Ok(())
}

#[test]
fn more_partitions_than_records_is_fine() -> anyhow::Result<()> {
    let renderer = Renderer::default().with_mode(RenderMode::Parallel {
        threads: None,
        partitions: Some(64),
    });
    let mut sink = ChunkSink::new();

    let rows = renderer.render(&events(5), &mut sink)?;

    assert_eq!(rows, 5);
    assert_eq!(rows_of(&sink.concat()).len(), 6);
    Ok(())
}

#[test]
fn full_report_render_matches_reference_shape() -> anyhow::Result<()> {
    let settings = CsvSettings {
        flatten_arrays: true,
        ..CsvSettings::default()
    };
    let renderer = Renderer::new(settings);
    let mut sink = ChunkSink::new();

    let rows = renderer.render(&sample_reports(100), &mut sink)?;

    assert_eq!(rows, 100);
    let output = sink.concat();
    let lines = rows_of(&output);
    assert_eq!(lines.len(), 101);
    assert_eq!(lines[0].split(',').count(), 60);
    for line in &lines[1..] {
        assert!(line.starts_with("32,string"));
        // One record-sequence cell per row; everything else is flattened bare.
        assert_eq!(line.matches('[').count(), 1);
        assert_eq!(line.matches('{').count(), 2);
    }
    Ok(())
}
