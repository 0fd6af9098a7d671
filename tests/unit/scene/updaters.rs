use super::*;

#[test]
fn run_invokes_in_insertion_order() {
    let mut ups: Updaters<'_, Vec<&str>> = Updaters::new();
    ups.add("a", |w| w.push("first"));
    ups.add("b", |w| w.push("second"));
    let mut world = Vec::new();
    ups.run(&mut world);
    ups.run(&mut world);
    assert_eq!(world, vec!["first", "second", "first", "second"]);
}

#[test]
fn remove_by_id_and_owner() {
    let mut ups: Updaters<'_, u32> = Updaters::new();
    let a = ups.add("rope", |w| *w += 1);
    ups.add("rope", |w| *w += 10);
    ups.add("pan", |w| *w += 100);
    assert_eq!(ups.len(), 3);

    assert!(ups.remove(a));
    assert!(!ups.remove(a));
    assert_eq!(ups.remove_owner("rope"), 1);
    assert_eq!(ups.remove_owner("rope"), 0);

    let mut w = 0;
    ups.run(&mut w);
    assert_eq!(w, 100);
    assert_eq!(ups.owners().collect::<Vec<_>>(), vec!["pan"]);
}

#[test]
fn ids_are_not_reused() {
    let mut ups: Updaters<'_, ()> = Updaters::new();
    let a = ups.add("x", |_| {});
    ups.remove(a);
    let b = ups.add("x", |_| {});
    assert_ne!(a, b);
    assert!(!ups.is_empty());
}
