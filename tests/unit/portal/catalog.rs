use super::*;
use crate::portal::assignment::produce_assignment;
use crate::portal::config::PortalConfig;

#[test]
fn first_assignment_is_consistent_per_student() {
    let config = PortalConfig::default();
    let spec = first_assignment().to_spec();
    let a = produce_assignment(&config, &spec, "2231", "Arta Hoxha").unwrap();

    assert!(a.description.starts_with("# Bazat e Programimit - Detyra 1"));
    assert!(a.description.contains("| Arta Hoxha | 2231 |"));

    let stdin = a.test_stdin.clone().unwrap();
    let inputs: Vec<i64> = stdin.lines().map(|l| l.parse().unwrap()).collect();
    assert!((3..6).contains(&inputs.len()));
    assert!(inputs.iter().all(|n| (1..50).contains(n)));
    assert!(a.description.contains(&stdin));
    assert!(a.description.contains(&format!("**{}** numra", inputs.len())));

    let summary = a.summary.clone().unwrap();
    assert!(summary.ends_with(&format!("e {} numrave", inputs.len())));
    assert!(summary.contains("shumën") || summary.contains("prodhimin"));

    assert_eq!(a, produce_assignment(&config, &spec, "2231", "Arta Hoxha").unwrap());
}

#[test]
fn students_get_different_inputs() {
    let config = PortalConfig::default();
    let spec = first_assignment().to_spec();
    let stdins: std::collections::HashSet<String> = (0..8)
        .map(|i| {
            produce_assignment(&config, &spec, &i.to_string(), "S")
                .unwrap()
                .test_stdin
                .unwrap()
        })
        .collect();
    assert!(stdins.len() > 1);
}
