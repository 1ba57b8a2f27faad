use colortext_core::{
    BuiltinLanguage, Command, CommandExecutor, Coordinates, CursorCommand, EditCommand, TextEditor,
};
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};

fn large_text(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 64);
    for i in 0..line_count {
        out.push_str(&format!(
            "\tint value_{i} = compute({i}, \"label\"); /* note */ // colortext benchmark line\n"
        ));
    }
    // Remove the final '\n' to avoid creating an extra trailing empty line.
    out.pop();
    out
}

fn c_editor(text: &str) -> TextEditor {
    let mut editor = TextEditor::default();
    editor
        .set_builtin_language(BuiltinLanguage::C)
        .expect("builtin languages compile");
    editor.set_text(text);
    editor
}

fn bench_colorize_all(c: &mut Criterion) {
    let text = large_text(20_000);
    c.bench_function("colorize_all/20k_lines", |b| {
        b.iter_batched(
            || c_editor(&text),
            |mut editor| {
                editor.colorize_all();
                black_box(editor.is_colorizing());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_typing_in_middle(c: &mut Criterion) {
    let text = large_text(20_000);
    c.bench_function("typing_middle/100_chars", |b| {
        b.iter_batched(
            || {
                let mut executor = CommandExecutor::from_editor(c_editor(&text));
                executor.editor_mut().colorize_all();
                executor
                    .execute(Command::Cursor(CursorCommand::MoveTo {
                        line: 10_000,
                        column: 8,
                    }))
                    .unwrap();
                executor
            },
            |mut executor| {
                for _ in 0..100 {
                    executor
                        .execute(Command::Edit(EditCommand::EnterCharacter {
                            ch: 'x',
                            shift: false,
                        }))
                        .unwrap();
                    executor.editor_mut().process_colorization();
                }
                black_box(executor.editor().cursor_position());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_undo_redo(c: &mut Criterion) {
    let text = large_text(5_000);
    c.bench_function("undo_redo/500_edits", |b| {
        b.iter_batched(
            || {
                let mut editor = c_editor(&text);
                editor.set_cursor_position(Coordinates::new(2_500, 0));
                for i in 0..500 {
                    if i % 10 == 9 {
                        editor.enter_character('\n', false);
                    } else {
                        editor.enter_character('y', false);
                    }
                }
                editor
            },
            |mut editor| {
                black_box(editor.undo(usize::MAX));
                black_box(editor.redo(usize::MAX));
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    benches,
    bench_colorize_all,
    bench_typing_in_middle,
    bench_undo_redo
);
criterion_main!(benches);
