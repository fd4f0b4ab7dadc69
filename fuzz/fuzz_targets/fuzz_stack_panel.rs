#![no_main]

use arbitrary::Arbitrary;
use dockpanel_layout::{
    Child, ItemId, Orientation, SizeConstraints, Size, Splitter, StackPanel,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    AddChild { at: u8, min: u8, max: Option<u16> },
    AddSplitter { at: u8, thickness: u8 },
    Remove { pick: u8 },
    ToggleCollapsed { pick: u8 },
    SetProportion { pick: u8, raw: f64 },
    Drag { pick: u8, delta: i16 },
    Resize { width: u16, height: u16 },
    Reset,
}

#[derive(Debug, Arbitrary)]
struct Input {
    vertical: bool,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let orientation = if input.vertical {
        Orientation::Vertical
    } else {
        Orientation::Horizontal
    };
    let mut panel = StackPanel::new(orientation);
    let mut size = Size::new(640.0, 480.0);

    for op in input.ops.into_iter().take(256) {
        let children: Vec<_> = panel.children().map(|(id, _)| id).collect();
        let splitters: Vec<_> = panel
            .item_ids()
            .iter()
            .filter_map(|id| match id {
                ItemId::Splitter(id) => Some(*id),
                ItemId::Child(_) => None,
            })
            .collect();

        match op {
            Op::AddChild { at, min, max } => {
                let (min, max) = (f64::from(min), max.map_or(f64::INFINITY, f64::from));
                let constraints = match orientation {
                    Orientation::Horizontal => SizeConstraints::UNCONSTRAINED.width(min, max),
                    Orientation::Vertical => SizeConstraints::UNCONSTRAINED.height(min, max),
                };
                let _ = panel.insert_child(usize::from(at), Child::new().with_constraints(constraints));
            }
            Op::AddSplitter { at, thickness } => {
                let _ = panel.insert_splitter(usize::from(at), Splitter::new(f64::from(thickness % 16)));
            }
            Op::Remove { pick } => {
                let ids = panel.item_ids().to_vec();
                if !ids.is_empty() {
                    panel
                        .remove(ids[usize::from(pick) % ids.len()])
                        .expect("listed item must be removable");
                }
            }
            Op::ToggleCollapsed { pick } if !children.is_empty() => {
                panel
                    .toggle_collapsed(children[usize::from(pick) % children.len()])
                    .expect("listed child must exist");
            }
            Op::SetProportion { pick, raw } if !children.is_empty() => {
                panel
                    .set_proportion(children[usize::from(pick) % children.len()], raw)
                    .expect("listed child must exist");
            }
            Op::Drag { pick, delta } if !splitters.is_empty() => {
                let splitter = splitters[usize::from(pick) % splitters.len()];
                if let Ok(outcome) = panel.drag_splitter(splitter, f64::from(delta)) {
                    assert!(outcome.target >= 0.0 && outcome.neighbor >= 0.0);
                    assert!(outcome.target.is_finite() && outcome.neighbor.is_finite());
                }
            }
            Op::Resize { width, height } => {
                size = Size::new(f64::from(width), f64::from(height));
            }
            Op::Reset => panel.reset_proportions(),
            _ => {}
        }

        let layout = panel.layout(size);
        let mut offset = 0.0;
        for item in &layout {
            assert!(item.length >= 0.0 && item.length.is_finite(), "{item:?}");
            assert_eq!(item.offset, offset);
            offset += item.length;
        }
        for (_, child) in panel.children() {
            let p = child.proportion().expect("assigned after layout");
            assert!(p.is_finite() && p >= 0.0, "{p}");
        }
        if layout.outcome.clamped == 0 && layout.outcome.committed_sum > 0.0 {
            assert!(layout.outcome.is_normalized(), "{:?}", layout.outcome);
        }
    }
});
