/// How view props map onto host attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostConfig {
    /// Prop key that carries the element's class list.
    pub class_prop: String,
    /// Attribute the class prop is stored under.
    pub class_attribute: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            class_prop: "className".to_string(),
            class_attribute: "class".to_string(),
        }
    }
}

impl HostConfig {
    pub fn attribute_name<'a>(&'a self, prop: &'a str) -> &'a str {
        if prop == self.class_prop {
            &self.class_attribute
        } else {
            prop
        }
    }
}

#[cfg(test)]
mod tests {
    use super::HostConfig;

    #[test]
    fn class_prop_maps_to_class_attribute() {
        let config = HostConfig::default();
        assert_eq!(config.attribute_name("className"), "class");
        assert_eq!(config.attribute_name("class"), "class");
        assert_eq!(config.attribute_name("id"), "id");
    }
}
