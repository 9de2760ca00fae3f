use chromatic::ooc::{
    self, load_nodes, write_graph, write_king_grid, write_to_path, GraphAdaptor, LoadOptions, NoProgress, Phase,
    Progress, DEFAULT_NEIGHBOUR_CAPACITY, MAGIC,
};
use chromatic::{validate_coloring, Error, Graph};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("chromatic-{name}-{}.bin", std::process::id()))
}

fn encode(graph: &Graph) -> GraphAdaptor<Vec<u8>> {
    let mut bytes = Vec::new();
    write_graph(graph, &mut bytes).unwrap();
    GraphAdaptor::from_bytes(bytes).unwrap()
}

fn petersen() -> Graph {
    let outer = (0..5).map(|v| (v, (v + 1) % 5));
    let spokes = (0..5).map(|v| (v, v + 5));
    let inner = (0..5).map(|v| (5 + v, 5 + (v + 2) % 5));
    Graph::from_edges(10, outer.chain(spokes).chain(inner)).unwrap()
}

#[test]
fn test_adjacency_survives_round_trip() {
    let graph = petersen();
    let adaptor = encode(&graph);
    assert_eq!(adaptor.vertex_count(), 10);
    assert_eq!(adaptor.edge_count(), 15);
    assert_eq!(adaptor.arc_count(), 30);
    for v in graph.vertices() {
        let stored: BTreeSet<usize> = adaptor.neighbours(v).unwrap().collect();
        let expected: BTreeSet<usize> = graph.neighbors(v).iter().copied().collect();
        assert_eq!(stored, expected, "vertex {v}");
        assert_eq!(adaptor.degree(v).unwrap(), graph.degree(v));
    }
    let back = adaptor.to_graph().unwrap();
    assert_eq!(back.edges().collect::<Vec<_>>(), graph.edges().collect::<Vec<_>>());
}

#[test]
fn test_mapped_file_matches_buffer() {
    let graph = petersen();
    let path = temp_path("petersen");
    write_to_path(&graph, &path).unwrap();

    let mapped = GraphAdaptor::open(&path).unwrap();
    let buffered = encode(&graph);
    assert_eq!(mapped.as_bytes(), buffered.as_bytes());
    assert_eq!(&mapped.as_bytes()[..8], &MAGIC);

    let report = ooc::color::<DEFAULT_NEIGHBOUR_CAPACITY, _, _>(&mapped, &LoadOptions::default(), &NoProgress).unwrap();
    // the Petersen graph has chromatic number 3
    assert!(report.colors >= 3);
    let colors: Vec<usize> = report.colors_of().iter().map(|&c| usize::from(c)).collect();
    assert!(validate_coloring(&graph, &colors).is_ok());

    drop(mapped);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_king_grid_through_mapped_file() {
    let path = temp_path("grid");
    let file = std::fs::File::create(&path).unwrap();
    write_king_grid(64, 48, std::io::BufWriter::new(file)).unwrap();

    let adaptor = GraphAdaptor::open(&path).unwrap();
    assert_eq!(adaptor.vertex_count(), 64 * 48);
    // horizontal, vertical and both diagonals
    let expected = 63 * 48 + 64 * 47 + 2 * 63 * 47;
    assert_eq!(adaptor.edge_count(), expected as u64);
    // interior cells touch all eight neighbours, corners three
    assert_eq!(adaptor.degree(64 + 1).unwrap(), 8);
    assert_eq!(adaptor.degree(0).unwrap(), 3);

    let report = ooc::color::<8, _, _>(&adaptor, &LoadOptions { chunk_size: 100 }, &NoProgress).unwrap();
    assert_eq!(report.vertex_count, 64 * 48);
    assert!((4..=9).contains(&report.colors));

    let graph = adaptor.to_graph().unwrap();
    let colors: Vec<usize> = report.colors_of().iter().map(|&c| usize::from(c)).collect();
    assert!(validate_coloring(&graph, &colors).is_ok());

    drop(adaptor);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_degree_over_capacity_is_unsupported() {
    let star = Graph::from_edges(10, (1..10).map(|leaf| (0, leaf))).unwrap();
    let adaptor = encode(&star);
    let err = load_nodes::<8, _, _>(&adaptor, &LoadOptions::default(), &NoProgress).unwrap_err();
    assert!(err.is_unsupported_instance());
    assert!(matches!(
        err,
        Error::DegreeOverCapacity {
            vertex: 0,
            degree: 9,
            capacity: 8
        }
    ));

    // a wider node fits it
    let nodes = load_nodes::<16, _, _>(&adaptor, &LoadOptions::default(), &NoProgress).unwrap();
    assert_eq!(nodes[0].degree(), 9);
}

#[test]
fn test_rejects_foreign_files() {
    let mut bytes = Vec::new();
    write_graph(&petersen(), &mut bytes).unwrap();

    let mut wrong_magic = bytes.clone();
    wrong_magic[..8].copy_from_slice(b"DSHUV0.9");
    assert!(matches!(GraphAdaptor::from_bytes(wrong_magic), Err(Error::BadMagic(m)) if &m == b"DSHUV0.9"));

    assert!(matches!(
        GraphAdaptor::from_bytes(&bytes[..10]),
        Err(Error::Truncated { what: "header" })
    ));
    assert!(matches!(
        GraphAdaptor::from_bytes(&bytes[..30]),
        Err(Error::Truncated { what: "offset table" })
    ));

    // offset table intact, last record cut short
    let cut = GraphAdaptor::from_bytes(&bytes[..bytes.len() - 2]).unwrap();
    assert!(matches!(cut.neighbours(9), Err(Error::Truncated { what: "vertex record" })));
}

#[derive(Default)]
struct Counting {
    load: AtomicU64,
    color: AtomicU64,
    validate: AtomicU64,
}

impl Progress for Counting {
    fn advance(&self, phase: Phase, done: u64, _total: u64) {
        let counter = match phase {
            Phase::Load => &self.load,
            Phase::Color => &self.color,
            Phase::Validate => &self.validate,
            Phase::Heap => return,
        };
        counter.fetch_add(done, Ordering::Relaxed);
    }
}

#[test]
fn test_progress_covers_every_vertex() {
    let mut bytes = Vec::new();
    write_king_grid(30, 30, &mut bytes).unwrap();
    let adaptor = GraphAdaptor::from_bytes(bytes).unwrap();
    let progress = Counting::default();
    ooc::color::<DEFAULT_NEIGHBOUR_CAPACITY, _, _>(&adaptor, &LoadOptions { chunk_size: 64 }, &progress).unwrap();
    assert_eq!(progress.load.load(Ordering::Relaxed), 900);
    assert_eq!(progress.color.load(Ordering::Relaxed), 900);
    assert_eq!(progress.validate.load(Ordering::Relaxed), 900);
}
