use crate::step::{ElementCommon, JsonMap, Step};

/// Which set of layout properties applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Viewport {
    #[default]
    Desktop,
    Mobile,
}

/// Returns a copy of `step` with viewport overrides applied.
///
/// Desktop is the identity transform. For mobile, `mobile_position` replaces
/// `position`, `mobile_styles` entries overwrite their desktop counterparts,
/// and any property key prefixed `mobile_` overwrites the unprefixed key.
/// An element with no mobile overrides is untouched, so both viewports agree
/// on all shared properties.
pub fn apply_viewport(step: &Step, viewport: Viewport) -> Step {
    let mut step = step.clone();
    if viewport == Viewport::Desktop {
        return step;
    }

    for grid in &mut step.subgrids {
        apply_common(&mut grid.common);
    }
    for field in &mut step.servar_fields {
        apply_common(&mut field.common);
        apply_mobile_properties(&mut field.properties);
    }
    for list in [
        &mut step.texts,
        &mut step.buttons,
        &mut step.images,
        &mut step.videos,
        &mut step.progress_bars,
    ] {
        for element in list {
            apply_common(&mut element.common);
            apply_mobile_properties(&mut element.properties);
        }
    }
    step
}

fn apply_common(common: &mut ElementCommon) {
    if let Some(position) = common.mobile_position.take() {
        common.position = position;
    }
    merge_overrides(&mut common.styles, &common.mobile_styles);
}

/// Overlays `overrides` onto `base`, key by key.
fn merge_overrides(base: &mut JsonMap, overrides: &JsonMap) {
    for (key, value) in overrides {
        base.insert(key.clone(), value.clone());
    }
}

/// Promotes `mobile_*` property keys over their unprefixed counterparts and
/// drops the prefixed entries.
fn apply_mobile_properties(properties: &mut JsonMap) {
    let mobile_keys: Vec<String> = properties
        .keys()
        .filter(|key| key.starts_with("mobile_"))
        .cloned()
        .collect();
    for key in mobile_keys {
        if let Some(value) = properties.remove(&key) {
            let target = key.trim_start_matches("mobile_").to_string();
            properties.insert(target, value);
        }
    }
}
