use std::rc::Rc;

use desktop_runtime::{
    DesktopAction, DesktopConfig, DesktopRuntime, OpenWindowRequest, WindowId, WindowKind,
    WindowRect, WindowSize, WindowState, LAYOUT_SNAPSHOT_KEY,
};
use futures::executor::block_on;
use platform_host::{KeyValueStore, MemoryKeyValueStore};
use pretty_assertions::assert_eq;

fn boot_on(store: &MemoryKeyValueStore, config: DesktopConfig) -> DesktopRuntime {
    block_on(DesktopRuntime::boot(config, Rc::new(store.clone()))).expect("boot runtime")
}

fn open(runtime: &DesktopRuntime, kind: WindowKind) -> WindowId {
    block_on(runtime.open_window(OpenWindowRequest::new(kind))).expect("window opened")
}

fn dispatch(runtime: &DesktopRuntime, action: DesktopAction) {
    block_on(runtime.dispatch(action));
}

#[test]
fn ids_are_unique_and_z_strictly_increases_across_focus_changes() {
    let runtime = boot_on(&MemoryKeyValueStore::new(), DesktopConfig::default());
    let a = open(&runtime, WindowKind::Terminal);
    let b = open(&runtime, WindowKind::FileExplorer);
    let c = open(&runtime, WindowKind::TextEditor);
    assert!(a < b && b < c);

    let mut last_top = runtime.windows().iter().map(|w| w.z_index).max();
    for target in [a, b, a, c, c, b] {
        dispatch(&runtime, DesktopAction::FocusWindow { window_id: target });
        let top = runtime.windows().iter().map(|w| w.z_index).max();
        assert!(top >= last_top);
        last_top = top;
        assert_eq!(runtime.topmost_window_id(), Some(target));
        assert_eq!(runtime.focused_window_id(), Some(target));
    }

    let zs = runtime
        .windows()
        .iter()
        .map(|w| w.z_index)
        .collect::<Vec<_>>();
    let mut unique = zs.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), zs.len());
}

#[test]
fn hydrating_mid_session_keeps_ids_and_z_moving_forward() {
    let runtime = boot_on(&MemoryKeyValueStore::new(), DesktopConfig::default());
    let earlier = [WindowKind::Terminal, WindowKind::FileExplorer, WindowKind::TextEditor]
        .map(|kind| open(&runtime, kind));
    let max_z = runtime.windows().iter().map(|w| w.z_index).max();

    let other = boot_on(&MemoryKeyValueStore::new(), DesktopConfig::default());
    open(&other, WindowKind::Settings);
    dispatch(
        &runtime,
        DesktopAction::HydrateSnapshot {
            snapshot: other.state().snapshot(),
        },
    );
    assert_eq!(runtime.windows().len(), 1);
    assert_eq!(runtime.processes().len(), 1);

    let next = open(&runtime, WindowKind::Terminal);
    assert!(!earlier.contains(&next));
    let next_z = runtime
        .windows()
        .iter()
        .find(|w| w.id == next)
        .map(|w| w.z_index);
    assert!(next_z > max_z);
}

#[test]
fn host_substrate_keeps_writes_on_native_builds() {
    let runtime =
        block_on(DesktopRuntime::boot_with_host(DesktopConfig::default())).expect("boot with host");

    assert!(!block_on(runtime.fs().list("/")).expect("list").is_empty());
    block_on(runtime.fs().write("/documents/a.txt", "A")).expect("write");
    assert_eq!(
        block_on(runtime.fs().read("/documents/a.txt")).expect("read"),
        "A"
    );
    assert_eq!(block_on(runtime.execute("cat /documents/a.txt")), "A");
}

#[test]
fn minimize_restore_and_maximize_restore_keep_geometry() {
    let runtime = boot_on(&MemoryKeyValueStore::new(), DesktopConfig::default());
    let id = open(&runtime, WindowKind::Terminal);
    dispatch(
        &runtime,
        DesktopAction::MoveWindow {
            window_id: id,
            x: 220,
            y: 140,
        },
    );
    let stored = runtime.effective_rect(id).expect("rect");
    assert_eq!(
        stored,
        WindowRect {
            x: 220,
            y: 140,
            w: 800,
            h: 600
        }
    );

    dispatch(&runtime, DesktopAction::MinimizeWindow { window_id: id });
    assert!(runtime.compositor_stack().is_empty());
    assert_eq!(runtime.taskbar().len(), 1);
    dispatch(&runtime, DesktopAction::ToggleTaskbarWindow { window_id: id });
    assert_eq!(runtime.effective_rect(id), Some(stored));

    dispatch(&runtime, DesktopAction::MaximizeWindow { window_id: id });
    assert_eq!(
        runtime.effective_rect(id),
        Some(WindowRect {
            x: 0,
            y: 0,
            w: 1280,
            h: 752
        })
    );
    dispatch(&runtime, DesktopAction::RestoreWindow { window_id: id });
    assert_eq!(runtime.effective_rect(id), Some(stored));
}

#[test]
fn resize_clamps_to_minimum() {
    let runtime = boot_on(&MemoryKeyValueStore::new(), DesktopConfig::default());
    let id = open(&runtime, WindowKind::TextEditor);

    dispatch(
        &runtime,
        DesktopAction::ResizeWindow {
            window_id: id,
            width: 120,
            height: 900,
        },
    );
    let rect = runtime.effective_rect(id).expect("rect");
    assert_eq!((rect.w, rect.h), (400, 900));
}

#[test]
fn taskbar_keeps_open_order_and_compositor_follows_z() {
    let runtime = boot_on(&MemoryKeyValueStore::new(), DesktopConfig::default());
    let a = open(&runtime, WindowKind::Terminal);
    let b = open(&runtime, WindowKind::Settings);
    let c = open(&runtime, WindowKind::FileExplorer);
    dispatch(&runtime, DesktopAction::FocusWindow { window_id: a });
    dispatch(&runtime, DesktopAction::MinimizeWindow { window_id: c });

    let taskbar = runtime
        .taskbar()
        .into_iter()
        .map(|button| button.window_id)
        .collect::<Vec<_>>();
    let stack = runtime
        .compositor_stack()
        .into_iter()
        .map(|w| w.id)
        .collect::<Vec<_>>();
    assert_eq!(taskbar, vec![a, b, c]);
    assert_eq!(stack, vec![b, a]);
}

#[test]
fn layout_persists_and_restores_across_boots() {
    let store = MemoryKeyValueStore::new();
    let mut config = DesktopConfig::default();
    config.session.persist_layout = true;
    config.session.restore_layout = true;

    let first = boot_on(&store, config.clone());
    let term = open(&first, WindowKind::Terminal);
    let editor = block_on(first.open_window(
        OpenWindowRequest::new(WindowKind::TextEditor).with_path("/desktop/notes.txt"),
    ))
    .expect("editor");
    dispatch(&first, DesktopAction::MaximizeWindow { window_id: term });
    dispatch(&first, DesktopAction::MinimizeWindow { window_id: editor });
    assert!(block_on(store.get(LAYOUT_SNAPSHOT_KEY))
        .expect("get")
        .is_some());

    let second = boot_on(&store, config);
    assert_eq!(second.windows(), first.windows());
    assert_eq!(second.focused_window_id(), Some(editor));
    assert_eq!(second.processes().len(), 2);
    assert_eq!(
        second.windows()[0].state,
        WindowState::Maximized
    );

    let next = open(&second, WindowKind::Settings);
    assert_eq!(next, WindowId(3));
    let z = second
        .windows()
        .iter()
        .map(|w| w.z_index)
        .collect::<Vec<_>>();
    assert!(z[2] > z[0] && z[2] > z[1]);
}

#[test]
fn viewport_changes_resize_maximized_windows() {
    let runtime = boot_on(&MemoryKeyValueStore::new(), DesktopConfig::default());
    let id = open(&runtime, WindowKind::Terminal);
    dispatch(&runtime, DesktopAction::MaximizeWindow { window_id: id });
    dispatch(
        &runtime,
        DesktopAction::SetViewport {
            width: 1920,
            height: 1080,
        },
    );

    assert_eq!(runtime.state().viewport, WindowSize { w: 1920, h: 1080 });
    assert_eq!(
        runtime.effective_rect(id),
        Some(WindowRect {
            x: 0,
            y: 0,
            w: 1920,
            h: 1032
        })
    );
}

#[test]
fn config_document_drives_window_defaults() {
    let config = DesktopConfig::from_toml_str(
        r#"
        [window]
        default_width = 640
        default_height = 480
        cascade_origin_x = 10
        cascade_origin_y = 20
        cascade_step = 5
        cascade_wrap = 2
        refocus_on_close = true
        "#,
    )
    .expect("config");
    let runtime = boot_on(&MemoryKeyValueStore::new(), config);

    let ids = (0..3)
        .map(|_| open(&runtime, WindowKind::Terminal))
        .collect::<Vec<_>>();
    let origins = runtime
        .windows()
        .iter()
        .map(|w| (w.rect.x, w.rect.y, w.rect.w, w.rect.h))
        .collect::<Vec<_>>();
    assert_eq!(
        origins,
        vec![(10, 20, 640, 480), (15, 25, 640, 480), (10, 20, 640, 480)]
    );

    dispatch(&runtime, DesktopAction::CloseWindow { window_id: ids[2] });
    assert_eq!(runtime.focused_window_id(), Some(ids[1]));
}
