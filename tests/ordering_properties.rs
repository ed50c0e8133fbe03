use tasknest_core::{domain::Ordered, Board, ColumnId, TaskId, TaskNestError, TaskUpdate};

fn board_with_columns(names: &[&str]) -> (Board, Vec<ColumnId>) {
    let mut board = Board::new("Props");
    let columns = names
        .iter()
        .map(|name| board.add_column(*name, "default"))
        .collect();
    (board, columns)
}

fn orders(board: &Board, column: &ColumnId) -> Vec<usize> {
    let mut orders: Vec<usize> = board
        .tasks
        .iter()
        .filter(|t| &t.column_id == column)
        .map(|t| t.order())
        .collect();
    orders.sort_unstable();
    orders
}

fn titles(board: &Board, column: &ColumnId) -> Vec<String> {
    board
        .column_tasks(column)
        .iter()
        .map(|t| t.title.clone())
        .collect()
}

fn assert_contiguous(board: &Board) {
    for column in &board.columns {
        let expected: Vec<usize> = (0..orders(board, &column.id).len()).collect();
        assert_eq!(orders(board, &column.id), expected, "column {}", column.name);
    }
    assert!(board.is_consistent());
}

/// Small deterministic generator so the operation mix is reproducible
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: usize) -> usize {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 33) as usize) % bound.max(1)
    }
}

#[test]
fn contiguity_holds_under_mixed_operations() {
    let (mut board, columns) = board_with_columns(&["Todo", "Doing", "Review", "Done"]);
    let mut rng = Lcg(42);
    let mut live: Vec<TaskId> = Vec::new();

    for step in 0..500 {
        let column = &columns[rng.next(columns.len())];
        match rng.next(10) {
            0..=3 => {
                let id = board
                    .add_task(column, format!("T{step}"), "", Vec::new())
                    .unwrap();
                live.push(id);
            }
            4..=7 if !live.is_empty() => {
                let task = &live[rng.next(live.len())];
                let index = rng.next(12);
                board.move_task(task, column, index).unwrap();
            }
            8 if !live.is_empty() => {
                let task = live.swap_remove(rng.next(live.len()));
                board.delete_task(&task).unwrap();
            }
            9 if !live.is_empty() => {
                let task = &live[rng.next(live.len())];
                board
                    .update_task(task, TaskUpdate::new().order(rng.next(6)))
                    .unwrap();
            }
            _ => {}
        }
        assert_contiguous(&board);
    }
    assert_eq!(board.tasks.len(), live.len());
}

#[test]
fn move_to_own_position_keeps_sequence() {
    let (mut board, columns) = board_with_columns(&["Todo"]);
    let todo = &columns[0];
    let ids: Vec<TaskId> = ["A", "B", "C", "D"]
        .iter()
        .map(|t| board.add_task(todo, *t, "", Vec::new()).unwrap())
        .collect();

    for (index, id) in ids.iter().enumerate() {
        let before = titles(&board, todo);
        board.move_task(id, todo, index).unwrap();
        assert_eq!(titles(&board, todo), before);
    }
}

#[test]
fn move_conserves_task_count() {
    let (mut board, columns) = board_with_columns(&["Todo", "Doing", "Done"]);
    let mut ids = Vec::new();
    for (i, column) in columns.iter().enumerate() {
        for n in 0..=i {
            ids.push(board.add_task(column, format!("{i}-{n}"), "", Vec::new()).unwrap());
        }
    }
    let total = board.tasks.len();

    for (i, id) in ids.iter().enumerate() {
        board.move_task(id, &columns[(i + 1) % columns.len()], i).unwrap();
        assert_eq!(board.tasks.len(), total);
    }
    assert_contiguous(&board);
}

#[test]
fn out_of_range_index_appends() {
    let (mut board, columns) = board_with_columns(&["Todo", "Doing"]);
    let moving = board.add_task(&columns[0], "M", "", Vec::new()).unwrap();
    for title in ["X", "Y", "Z"] {
        board.add_task(&columns[1], title, "", Vec::new()).unwrap();
    }

    let placed = board.move_task(&moving, &columns[1], 9999).unwrap();

    assert_eq!(placed, 3);
    assert_eq!(board.task(&moving).unwrap().order, 3);
    assert_eq!(titles(&board, &columns[1]), vec!["X", "Y", "Z", "M"]);
}

#[test]
fn last_column_guard_leaves_board_unchanged() {
    let (mut board, columns) = board_with_columns(&["Only"]);
    board.add_task(&columns[0], "A", "", Vec::new()).unwrap();
    let before = board.clone();

    let result = board.delete_column(&columns[0]);

    assert!(matches!(result, Err(TaskNestError::LastColumn(_))));
    assert_eq!(board.columns, before.columns);
    assert_eq!(board.tasks, before.tasks);
}

#[test]
fn move_between_columns_scenario() {
    let (mut board, columns) = board_with_columns(&["Todo", "Doing", "Done"]);
    let (todo, doing) = (&columns[0], &columns[1]);
    let a = board.add_task(todo, "A", "", Vec::new()).unwrap();
    let b = board.add_task(todo, "B", "", Vec::new()).unwrap();

    board.move_task(&b, doing, 0).unwrap();

    assert_eq!(titles(&board, doing), vec!["B"]);
    assert_eq!(board.task(&b).unwrap().order, 0);
    assert_eq!(titles(&board, todo), vec!["A"]);
    assert_eq!(board.task(&a).unwrap().order, 0);
}

#[test]
fn add_task_into_empty_column_scenario() {
    let (mut board, columns) = board_with_columns(&["Todo"]);
    let first = board.add_task(&columns[0], "First", "", Vec::new()).unwrap();
    let second = board.add_task(&columns[0], "Second", "", Vec::new()).unwrap();

    assert_eq!(board.task(&first).unwrap().order, 0);
    assert_eq!(board.task(&second).unwrap().order, 1);
}

#[test]
fn deletes_compact_orders() {
    let (mut board, columns) = board_with_columns(&["Todo", "Doing", "Done"]);
    let ids: Vec<TaskId> = ["A", "B", "C"]
        .iter()
        .map(|t| board.add_task(&columns[0], *t, "", Vec::new()).unwrap())
        .collect();

    board.delete_task(&ids[0]).unwrap();
    assert_eq!(orders(&board, &columns[0]), vec![0, 1]);

    board.delete_column(&columns[0]).unwrap();
    let column_orders: Vec<usize> = board.sorted_columns().iter().map(|c| c.order).collect();
    assert_eq!(column_orders, vec![0, 1]);
    assert!(board.tasks.is_empty());
}
