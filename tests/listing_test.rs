use std::num::NonZeroUsize;

use roster::listing::{derive_page, filter_students, matches_search, total_pages};
use roster::models::{Student, StudentId};

fn student(id: u64, name: &str, course: &str) -> Student {
    Student {
        id: StudentId::Number(id),
        name: name.to_string(),
        age: 18 + (id % 10) as u32,
        email: format!("s{}@uni.edu", id),
        course: course.to_string(),
    }
}

fn size(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).expect("page size must be positive")
}

fn numbered(count: u64) -> Vec<Student> {
    (1..=count)
        .map(|i| student(i, &format!("Student {}", i), if i % 2 == 0 { "Math" } else { "Art" }))
        .collect()
}

fn mixed() -> Vec<Student> {
    vec![
        student(1, "Ana", "Math"),
        student(2, "Bart", "Math"),
        student(3, "Cleo", "Art"),
        student(4, "Dev", "History"),
        student(5, "Élodie", "Fine Arts"),
        student(6, "martin", "Physics"),
        student(7, "Zoe", "MATH"),
    ]
}

fn ids(rows: &[&Student]) -> Vec<StudentId> {
    rows.iter().map(|s| s.id.clone()).collect()
}

#[test]
fn twelve_students_split_into_three_pages() {
    let collection = numbered(12);

    let first = derive_page(&collection, "", 1, size(5));
    let second = derive_page(&collection, "", 2, size(5));
    let third = derive_page(&collection, "", 3, size(5));

    assert_eq!(first.total_pages, 3);
    assert_eq!(ids(&first.rows), (1..=5).map(StudentId::Number).collect::<Vec<_>>());
    assert_eq!(ids(&second.rows), (6..=10).map(StudentId::Number).collect::<Vec<_>>());
    assert_eq!(ids(&third.rows), vec![StudentId::Number(11), StudentId::Number(12)]);
    assert!(first.has_next() && !first.has_previous());
    assert!(third.has_previous() && !third.has_next());
}

#[test]
fn search_matches_name_or_course_ignoring_case() {
    let collection = mixed();
    let page = derive_page(&collection, "art", 1, size(5));

    // Bart and martin by name, Cleo and Élodie by course.
    assert_eq!(
        ids(&page.rows),
        vec![
            StudentId::Number(2),
            StudentId::Number(3),
            StudentId::Number(5),
            StudentId::Number(6),
        ]
    );
    assert_eq!(page.total_matches, 4);
    assert_eq!(page.total_pages, 1);

    let upper = derive_page(&collection, "ART", 1, size(3));
    assert_eq!(upper.total_pages, 2);
    assert_eq!(upper.rows.len(), 3);
}

#[test]
fn non_ascii_terms_fold_case() {
    let collection = mixed();
    let found = filter_students(&collection, "éLODIE");
    assert_eq!(ids(&found), vec![StudentId::Number(5)]);
}

#[test]
fn empty_term_keeps_collection_in_order() {
    let collection = mixed();
    let filtered = filter_students(&collection, "");
    let expected: Vec<&Student> = collection.iter().collect();
    assert_eq!(filtered, expected);
}

#[test]
fn filter_keeps_exactly_the_matching_students() {
    let collection = mixed();
    for term in ["a", "MATH", "his", "o", "zzz", "t"] {
        let needle = term.to_lowercase();
        let kept = filter_students(&collection, term);

        for s in &kept {
            assert!(
                s.name.to_lowercase().contains(&needle) || s.course.to_lowercase().contains(&needle),
                "{} should not match {:?}",
                s.name,
                term
            );
        }
        for s in collection.iter().filter(|s| !kept.contains(s)) {
            assert!(!matches_search(s, &needle), "{} should match {:?}", s.name, term);
        }
    }
}

#[test]
fn pages_concatenate_back_to_the_filtered_list() {
    let collection = numbered(23);
    for term in ["", "math", "1", "student 2"] {
        let filtered = filter_students(&collection, term);
        for page_size in 1..=7 {
            let first = derive_page(&collection, term, 1, size(page_size));
            assert_eq!(first.total_pages, total_pages(filtered.len(), size(page_size)));

            let rebuilt: Vec<&Student> = (1..=first.total_pages)
                .flat_map(|p| derive_page(&collection, term, p, size(page_size)).rows)
                .collect();
            assert_eq!(rebuilt, filtered, "term {:?} size {}", term, page_size);
        }
    }
}

#[test]
fn page_count_is_ceiling_and_zero_when_empty() {
    let collection = numbered(11);
    assert_eq!(derive_page(&collection, "", 1, size(5)).total_pages, 3);
    assert_eq!(derive_page(&collection, "", 1, size(11)).total_pages, 1);

    let nothing = derive_page(&collection, "no such student", 1, size(5));
    assert_eq!(nothing.total_pages, 0);
    assert!(nothing.rows.is_empty());
    assert!(!nothing.has_next());
    assert!(!nothing.has_previous());
}

#[test]
fn page_past_the_end_is_empty() {
    let collection = numbered(6);
    let page = derive_page(&collection, "", 3, size(5));
    assert!(page.rows.is_empty());
    assert_eq!(page.total_pages, 2);
    assert!(page.has_previous());

    let zero = derive_page(&collection, "", 0, size(5));
    assert!(zero.rows.is_empty());
}

#[test]
fn stale_page_after_narrow_search_comes_out_empty() {
    let collection = numbered(12);
    let narrowed = derive_page(&collection, "student 1", 3, size(5));
    assert_eq!(narrowed.total_pages, 1);
    assert!(narrowed.rows.is_empty());
}

#[test]
fn derivation_is_deterministic() {
    let collection = mixed();
    let a = derive_page(&collection, "a", 2, size(2));
    let b = derive_page(&collection, "a", 2, size(2));
    assert_eq!(a, b);
}

#[test]
fn derivation_leaves_the_collection_untouched() {
    let collection = mixed();
    let before = collection.clone();
    let _ = derive_page(&collection, "math", 1, size(2));
    assert_eq!(collection, before);
}
