use chromatic::io::dimacs;
use chromatic::{solve, Algorithm, Error, SolveOptions};

const MYCIEL3: &str = "\
c FILE: myciel3.col
c Mycielski graph of the 5-cycle
p edge 11 20
e 1 2
e 1 4
e 1 7
e 1 9
e 2 3
e 2 6
e 2 8
e 3 5
e 3 7
e 3 10
e 4 5
e 4 6
e 4 10
e 5 8
e 5 9
e 6 11
e 7 11
e 8 11
e 9 11
e 10 11
";

#[test]
fn test_myciel3_chromatic_number() {
    let graph = dimacs::read(MYCIEL3.as_bytes()).unwrap();
    assert_eq!(graph.vertex_count(), 11);
    assert_eq!(graph.edge_count(), 20);
    assert_eq!(graph.max_degree(), 5);

    for algorithm in [Algorithm::BnbDsatur, Algorithm::BnbDsaturSewell, Algorithm::BnbDsaturPass] {
        assert_eq!(solve(&graph, algorithm, &SolveOptions::default()).color_count(), Some(4), "{algorithm}");
    }
    for algorithm in Algorithm::ALL.into_iter().filter(|a| !a.is_exact()) {
        let colors = solve(&graph, algorithm, &SolveOptions::default()).color_count().unwrap();
        assert!((4..=6).contains(&colors), "{algorithm}: {colors}");
    }
}

#[test]
fn test_write_then_read() {
    let graph = dimacs::read(MYCIEL3.as_bytes()).unwrap();
    let mut text = Vec::new();
    dimacs::write(&graph, &mut text).unwrap();
    let text = String::from_utf8(text).unwrap();
    assert!(text.starts_with("p edge 11 20\n"));
    assert_eq!(text.lines().filter(|l| l.starts_with("e ")).count(), 20);

    let back = dimacs::read(text.as_bytes()).unwrap();
    assert_eq!(back.edges().collect::<Vec<_>>(), graph.edges().collect::<Vec<_>>());
}

#[test]
fn test_both_directions_listed() {
    let text = "p edge 3 2\ne 1 2\ne 2 1\ne 2 3\ne 3 2\n";
    let graph = dimacs::read(text.as_bytes()).unwrap();
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.neighbors(1), &[0, 2]);
}

#[test]
fn test_errors_carry_line_numbers() {
    let cases: [(&str, usize); 6] = [
        ("e 1 2\n", 1),
        ("p edge 3 1\ne 1 x\n", 2),
        ("c\np edge 3 1\ne 0 2\n", 3),
        ("p edge 3 1\ne 1 4\n", 2),
        ("p edge 3 1\ne 2 2\n", 2),
        ("p edge 2 1\nq 1 2\n", 2),
    ];
    for (text, expected) in cases {
        match dimacs::read(text.as_bytes()) {
            Err(Error::Parse { line, .. }) => assert_eq!(line, expected, "{text:?}"),
            other => panic!("{text:?}: expected a parse error, got {other:?}"),
        }
    }
}

#[test]
fn test_missing_problem_line() {
    assert!(matches!(
        dimacs::read("c nothing here\n".as_bytes()),
        Err(Error::Parse { line: 0, .. })
    ));
}
