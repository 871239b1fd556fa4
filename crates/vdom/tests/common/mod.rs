use vdom::{Element, PropValue, Props, ViewNode};

const TAGS: [&str; 3] = ["div", "span", "ul"];
const PROP_KEYS: [&str; 5] = ["id", "className", "title", "tabIndex", "hidden"];

/// Deterministic LCG so failures reproduce from the seed alone.
pub struct TreeGen {
    state: u64,
    pub truthy_only: bool,
}

impl TreeGen {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed ^ 0x9E37_79B9_7F4A_7C15,
            truthy_only: false,
        }
    }

    fn next(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.state >> 33
    }

    fn below(&mut self, n: u64) -> usize {
        (self.next() % n) as usize
    }

    pub fn value(&mut self) -> PropValue {
        let pick = if self.truthy_only {
            1 + self.below(4)
        } else {
            self.below(7)
        };
        match pick {
            0 => PropValue::from(""),
            1 => PropValue::Str(format!("v{}", self.below(3))),
            2 => PropValue::Int(1 + self.below(2) as i64),
            3 => PropValue::Float(1.5),
            4 => PropValue::Bool(true),
            5 => PropValue::Int(0),
            _ => PropValue::Bool(false),
        }
    }

    pub fn props(&mut self) -> Props {
        let mut props = Props::new();
        for key in PROP_KEYS {
            if self.below(2) == 0 {
                let value = self.value();
                props.insert(key.to_string(), value);
            }
        }
        props
    }

    pub fn element(&mut self, depth: usize) -> Element {
        let tag = TAGS[self.below(TAGS.len() as u64)].to_string();
        let props = self.props();
        let count = if depth == 0 { 0 } else { self.below(5) };
        let children = (0..count).map(|_| self.tree(depth - 1)).collect();
        Element {
            tag,
            props,
            children,
        }
    }

    pub fn tree(&mut self, depth: usize) -> ViewNode {
        if depth == 0 || self.below(4) == 0 {
            ViewNode::Text(format!("t{}", self.below(3)))
        } else {
            ViewNode::Element(self.element(depth))
        }
    }
}
