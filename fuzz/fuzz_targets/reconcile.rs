#![no_main]

use dom_store::DomStore;
use libfuzzer_sys::fuzz_target;
use vdom::snapshot::{SnapshotOptions, compare_views};
use vdom::{Element, PropValue, Props, ViewNode, apply, diff_trees, mount};

const MAX_DEPTH: usize = 5;
const MAX_CHILDREN: usize = 6;
const TAGS: [&str; 4] = ["div", "ul", "li", "span"];
const PROP_KEYS: [&str; 4] = ["id", "className", "title", "hidden"];

struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl ByteReader<'_> {
    fn byte(&mut self) -> u8 {
        let value = self.data.get(self.pos).copied().unwrap_or(0);
        self.pos += 1;
        value
    }

    fn pick(&mut self, n: usize) -> usize {
        self.byte() as usize % n
    }

    fn value(&mut self) -> PropValue {
        match self.pick(6) {
            0 => PropValue::from(""),
            1 => PropValue::Str(format!("s{}", self.pick(4))),
            2 => PropValue::Int(self.pick(3) as i64),
            3 => PropValue::Float(if self.pick(2) == 0 { 0.0 } else { 2.5 }),
            4 => PropValue::Bool(self.pick(2) == 1),
            _ => PropValue::Null,
        }
    }

    fn tree(&mut self, depth: usize) -> ViewNode {
        if depth >= MAX_DEPTH || self.pick(3) == 0 {
            return ViewNode::Text(format!("t{}", self.pick(4)));
        }
        let tag = TAGS[self.pick(TAGS.len())].to_string();
        let mut props = Props::new();
        for key in PROP_KEYS {
            if self.pick(2) == 1 {
                let value = self.value();
                props.insert(key.to_string(), value);
            }
        }
        let count = self.pick(MAX_CHILDREN + 1);
        let children = (0..count).map(|_| self.tree(depth + 1)).collect();
        ViewNode::Element(Element {
            tag,
            props,
            children,
        })
    }
}

fuzz_target!(|data: &[u8]| {
    let mut reader = ByteReader { data, pos: 0 };
    let old = reader.tree(0);
    let new = reader.tree(0);

    let mut store = DomStore::new();
    let root = store.root();
    mount(&mut store, root, &old).expect("mount old");
    apply(&mut store, root, diff_trees(&new, &old)).expect("apply diff");

    let mut fresh = DomStore::new();
    let fresh_root = fresh.root();
    mount(&mut fresh, fresh_root, &new).expect("mount new");

    let patched = store.materialize(root).expect("materialize patched");
    let expected = fresh.materialize(fresh_root).expect("materialize fresh");
    if let Err(mismatch) = compare_views(&expected, &patched, SnapshotOptions::default()) {
        panic!("{mismatch}");
    }
});
