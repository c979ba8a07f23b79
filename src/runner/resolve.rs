//! Dependency resolution
//!
//! Expands a task's transitive prerequisites into a total execution order.

use crate::config::{Task, Taskfile};
use crate::error::{ConfigError, ConfigResult};
use std::collections::HashSet;

/// Resolve the execution order for `task_name`
///
/// Prerequisites are expanded depth-first in declared order before the
/// task itself. A task reachable through several paths appears once, at
/// its first resolution. Revisiting a task that is still being expanded
/// is a [`ConfigError::CyclicDependency`].
pub fn resolve<'a>(taskfile: &'a Taskfile, task_name: &str) -> ConfigResult<Vec<&'a Task>> {
    let task = taskfile
        .get(task_name)
        .ok_or_else(|| ConfigError::UnknownTask(task_name.to_string()))?;

    let mut order = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    // Tasks on the current expansion path, each with its next prerequisite
    let mut stack: Vec<(&Task, usize)> = vec![(task, 0)];
    let mut on_stack: HashSet<&str> = HashSet::from([task.name.as_str()]);

    while let Some(frame) = stack.last_mut() {
        let (current, next) = *frame;

        let Some(prereq) = current.prerequisites.get(next) else {
            stack.pop();
            on_stack.remove(current.name.as_str());
            visited.insert(&current.name);
            order.push(current);
            continue;
        };
        frame.1 += 1;

        let dep = taskfile
            .get(prereq)
            .ok_or_else(|| ConfigError::MissingPrerequisite {
                task: current.name.clone(),
                prerequisite: prereq.clone(),
            })?;

        if on_stack.contains(dep.name.as_str()) {
            return Err(ConfigError::CyclicDependency(cycle_path(&stack, dep)));
        }

        // Skip if already fully processed
        if visited.contains(dep.name.as_str()) {
            continue;
        }

        on_stack.insert(&dep.name);
        stack.push((dep, 0));
    }

    Ok(order)
}

/// `a -> b -> a`, starting at the first occurrence of `repeated`
fn cycle_path(stack: &[(&Task, usize)], repeated: &Task) -> String {
    let start = stack
        .iter()
        .position(|(t, _)| t.name == repeated.name)
        .unwrap_or(0);
    stack[start..]
        .iter()
        .map(|(t, _)| t.name.as_str())
        .chain(std::iter::once(repeated.name.as_str()))
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_taskfile;

    fn names(order: &[&Task]) -> Vec<String> {
        order.iter().map(|t| t.name.clone()).collect()
    }

    #[test]
    fn test_resolve_single_task() {
        let taskfile = parse_taskfile("a:\n\techo a\n").unwrap();
        let order = resolve(&taskfile, "a").unwrap();
        assert_eq!(names(&order), vec!["a"]);
    }

    #[test]
    fn test_prerequisites_come_first_in_declared_order() {
        let taskfile = parse_taskfile("release: fmt build\nfmt:\nbuild: fmt\n").unwrap();
        let order = resolve(&taskfile, "release").unwrap();
        assert_eq!(names(&order), vec!["fmt", "build", "release"]);
    }

    #[test]
    fn test_diamond_is_deduplicated() {
        let taskfile = parse_taskfile("a: b c\nb: d\nc: d\nd:\n").unwrap();
        let order = resolve(&taskfile, "a").unwrap();
        assert_eq!(names(&order), vec!["d", "b", "c", "a"]);
    }

    #[test]
    fn test_unknown_task() {
        let taskfile = parse_taskfile("a:\n").unwrap();
        let result = resolve(&taskfile, "nope");
        assert!(matches!(result, Err(ConfigError::UnknownTask(name)) if name == "nope"));
    }

    #[test]
    fn test_missing_prerequisite() {
        let taskfile = parse_taskfile("a: ghost\n").unwrap();
        let result = resolve(&taskfile, "a");
        assert!(matches!(
            result,
            Err(ConfigError::MissingPrerequisite { task, prerequisite })
                if task == "a" && prerequisite == "ghost"
        ));
    }

    #[test]
    fn test_cycle_names_the_path() {
        let taskfile = parse_taskfile("top: a\na: b\nb: c\nc: a\n").unwrap();
        let result = resolve(&taskfile, "top");
        match result {
            Err(ConfigError::CyclicDependency(path)) => assert_eq!(path, "a -> b -> c -> a"),
            other => panic!("expected a cycle, got {:?}", other),
        }
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        let taskfile = parse_taskfile("a: a\n").unwrap();
        let result = resolve(&taskfile, "a");
        assert!(matches!(result, Err(ConfigError::CyclicDependency(path)) if path == "a -> a"));
    }

    #[test]
    fn test_long_chain_resolves_without_recursion() {
        let n = 100_000;
        let mut text = String::new();
        for i in 0..n {
            text.push_str(&format!("t{}: t{}\n", i, i + 1));
        }
        text.push_str(&format!("t{}:\n", n));

        let taskfile = parse_taskfile(&text).unwrap();
        let order = resolve(&taskfile, "t0").unwrap();

        assert_eq!(order.len(), n + 1);
        assert_eq!(order[0].name, format!("t{}", n));
        assert_eq!(order[n].name, "t0");
    }

    #[test]
    fn test_long_cycle_is_reported() {
        let n = 50_000;
        let mut text = String::new();
        for i in 0..n {
            text.push_str(&format!("t{}: t{}\n", i, (i + 1) % n));
        }

        let taskfile = parse_taskfile(&text).unwrap();
        match resolve(&taskfile, "t0") {
            Err(ConfigError::CyclicDependency(path)) => {
                assert!(path.starts_with("t0 -> t1 -> "));
                assert!(path.ends_with(&format!("t{} -> t0", n - 1)));
            }
            other => panic!("expected a cycle, got {:?}", other.map(|o| o.len())),
        }
    }

    #[test]
    fn test_forward_references() {
        let taskfile = parse_taskfile("all: later\n\nlater:\n\techo later\n").unwrap();
        let order = resolve(&taskfile, "all").unwrap();
        assert_eq!(names(&order), vec!["later", "all"]);
    }

    #[test]
    fn test_every_prerequisite_precedes_its_task() {
        let text = "\
all: docs test
docs: build
test: build lint
build: fmt gen
lint: fmt
gen:
fmt:
";
        let taskfile = parse_taskfile(text).unwrap();
        for name in taskfile.tasks.keys() {
            let order = resolve(&taskfile, name).unwrap();
            let position = |n: &str| order.iter().position(|t| t.name == n);
            for task in &order {
                let own = position(&task.name).unwrap();
                for prereq in &task.prerequisites {
                    let before = position(prereq).expect("prerequisite resolved");
                    assert!(before < own, "{} must precede {}", prereq, task.name);
                }
            }
            let unique: HashSet<&str> = order.iter().map(|t| t.name.as_str()).collect();
            assert_eq!(unique.len(), order.len());
        }
    }
}
