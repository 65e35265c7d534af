use std::cmp::Ordering;

use dao_atoms::tasks::Task;

use crate::types::{BoardFilter, BoardState, ColumnView, SortKey, SortSpec, UndatedPlacement};

/// Derive the per-column task lists shown on the board.
///
/// Columns follow `column_order`; an id in the order with no column yields an
/// empty list, and ids pointing at missing tasks are skipped. Sorting is
/// stable, so ties keep their stored order.
pub fn board_view<'a>(state: &'a BoardState, filter: &BoardFilter) -> Vec<ColumnView<'a>> {
    state
        .column_order
        .iter()
        .map(|column_id| {
            let Some(column) = state.columns.get(column_id) else {
                return ColumnView {
                    column_id,
                    title: "",
                    tasks: Vec::new(),
                };
            };

            let mut tasks = column
                .task_ids
                .iter()
                .filter_map(|id| state.tasks.get(id))
                .filter(|t| filter.priority.map_or(true, |p| t.priority == p))
                .filter(|t| filter.category.map_or(true, |c| t.category == Some(c)))
                .collect::<Vec<_>>();

            if let Some(spec) = &filter.sort {
                tasks.sort_by(|a, b| compare(a, b, spec));
            }

            ColumnView {
                column_id,
                title: &column.title,
                tasks,
            }
        })
        .collect()
}

fn compare(a: &Task, b: &Task, spec: &SortSpec) -> Ordering {
    match spec.key {
        SortKey::Priority => spec.direction.apply(a.priority.rank().cmp(&b.priority.rank())),
        SortKey::CreatedAt => spec.direction.apply(a.created_at.cmp(&b.created_at)),
        SortKey::DueDate => match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => spec.direction.apply(x.cmp(&y)),
            (Some(_), None) => undated_after(spec.undated),
            (None, Some(_)) => undated_after(spec.undated).reverse(),
            (None, None) => Ordering::Equal,
        },
    }
}

/// Ordering of a dated task relative to an undated one.
fn undated_after(placement: UndatedPlacement) -> Ordering {
    match placement {
        UndatedPlacement::Last => Ordering::Less,
        UndatedPlacement::First => Ordering::Greater,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_board;
    use crate::types::SortDirection;
    use chrono::NaiveDate;
    use dao_atoms::tasks::{Priority, TaskCategory};

    fn ids<'a>(view: &'a [ColumnView<'a>], column: &str) -> Vec<&'a str> {
        view.iter()
            .find(|c| c.column_id == column)
            .map(|c| c.task_ids())
            .unwrap_or_default()
    }

    #[test]
    fn unfiltered_view_keeps_stored_order() {
        let state = default_board();
        let view = board_view(&state, &BoardFilter::default());

        assert_eq!(
            view.iter().map(|c| c.title).collect::<Vec<_>>(),
            vec!["To Do", "In Progress", "In Review", "Done"]
        );
        assert_eq!(ids(&view, "column-1"), vec!["task-1", "task-2"]);
        assert_eq!(ids(&view, "column-2"), vec!["task-3", "task-5"]);
    }

    #[test]
    fn filters_by_priority_and_category() {
        let mut state = default_board();
        state.tasks.get_mut("task-2").unwrap().priority = Priority::Low;

        let view = board_view(
            &state,
            &BoardFilter {
                priority: Some(Priority::High),
                ..Default::default()
            },
        );
        assert_eq!(ids(&view, "column-1"), vec!["task-1"]);
        assert!(ids(&view, "column-2").is_empty());

        let view = board_view(
            &state,
            &BoardFilter {
                category: Some(TaskCategory::CommunityInitiative),
                ..Default::default()
            },
        );
        assert!(ids(&view, "column-1").is_empty());
        assert_eq!(ids(&view, "column-2"), vec!["task-3", "task-5"]);
    }

    #[test]
    fn due_date_sort_puts_undated_last_in_both_directions() {
        let mut state = default_board();
        // task-3 is due 2024-08-30, task-5 has no due date
        state.columns.get_mut("column-2").unwrap().task_ids = vec!["task-5".into(), "task-3".into()];

        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let view = board_view(
                &state,
                &BoardFilter {
                    sort: Some(SortSpec::new(SortKey::DueDate, direction)),
                    ..Default::default()
                },
            );
            assert_eq!(ids(&view, "column-2"), vec!["task-3", "task-5"]);
        }

        let mut first = SortSpec::new(SortKey::DueDate, SortDirection::Asc);
        first.undated = UndatedPlacement::First;
        state.columns.get_mut("column-2").unwrap().task_ids = vec!["task-3".into(), "task-5".into()];
        let view = board_view(
            &state,
            &BoardFilter {
                sort: Some(first),
                ..Default::default()
            },
        );
        assert_eq!(ids(&view, "column-2"), vec!["task-5", "task-3"]);
    }

    #[test]
    fn due_date_sort_orders_dated_tasks_by_direction() {
        let state = default_board();
        let asc = board_view(
            &state,
            &BoardFilter {
                sort: Some(SortSpec::new(SortKey::DueDate, SortDirection::Asc)),
                ..Default::default()
            },
        );
        assert_eq!(ids(&asc, "column-1"), vec!["task-1", "task-2"]);
        assert_eq!(state.tasks["task-1"].due_date, NaiveDate::from_ymd_opt(2024, 9, 15));

        let desc = board_view(
            &state,
            &BoardFilter {
                sort: Some(SortSpec::new(SortKey::DueDate, SortDirection::Desc)),
                ..Default::default()
            },
        );
        assert_eq!(ids(&desc, "column-1"), vec!["task-2", "task-1"]);
    }

    #[test]
    fn priority_and_created_sorts_leave_stored_order_alone() {
        let mut state = default_board();
        state.tasks.get_mut("task-1").unwrap().priority = Priority::Low;
        let stored = state.columns["column-1"].task_ids.clone();

        let view = board_view(
            &state,
            &BoardFilter {
                sort: Some(SortSpec::new(SortKey::Priority, SortDirection::Asc)),
                ..Default::default()
            },
        );
        assert_eq!(ids(&view, "column-1"), vec!["task-2", "task-1"]);

        let view = board_view(
            &state,
            &BoardFilter {
                sort: Some(SortSpec::new(SortKey::CreatedAt, SortDirection::Desc)),
                ..Default::default()
            },
        );
        // task-2 was created after task-1
        assert_eq!(ids(&view, "column-1"), vec!["task-2", "task-1"]);
        assert_eq!(state.columns["column-1"].task_ids, stored);
    }
}
