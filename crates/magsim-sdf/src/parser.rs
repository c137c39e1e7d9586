//! Parameter block parser.

use std::fs;
use std::path::Path;

use magsim_dipole::Magnet;
use magsim_math::{Pose, Quat, Vec3};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::{Result, SdfError};

/// Parsed magnet-pair parameters.
///
/// Recognized elements:
/// `parentBodyName`/`childBodyName` (required), per-side
/// `...DipoleMoment`, `...XyzOffset`, `...RpyOffset` (all default zero),
/// `shouldPublish`, `updateRate`, `topicNs`.
#[derive(Debug, Clone, PartialEq)]
pub struct PairConfig {
    /// Name of the body carrying the parent magnet.
    pub parent_body: String,
    /// Name of the body carrying the child magnet.
    pub child_body: String,
    /// Parent dipole moment in its magnet's local frame (A·m²).
    pub parent_moment: Vec3,
    /// Child dipole moment in its magnet's local frame (A·m²).
    pub child_moment: Vec3,
    /// Parent magnet translation offset from its body frame (m).
    pub parent_xyz_offset: Vec3,
    /// Child magnet translation offset from its body frame (m).
    pub child_xyz_offset: Vec3,
    /// Parent magnet roll-pitch-yaw offset from its body frame (rad).
    pub parent_rpy_offset: Vec3,
    /// Child magnet roll-pitch-yaw offset from its body frame (rad).
    pub child_rpy_offset: Vec3,
    /// Whether interaction results should be offered to the publisher.
    pub should_publish: bool,
    /// Publish rate limit in Hz; 0 means unconstrained.
    pub update_rate: f64,
    /// Topic namespace for published messages.
    pub topic_ns: String,
}

impl PairConfig {
    /// Load a parameter block from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let xml = fs::read_to_string(path)?;
        Self::from_xml_str(&xml)
    }

    /// Load a parameter block from an XML string.
    pub fn from_xml_str(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut parent_body: Option<String> = None;
        let mut child_body: Option<String> = None;
        let mut parent_moment = Vec3::zeros();
        let mut child_moment = Vec3::zeros();
        let mut parent_xyz_offset = Vec3::zeros();
        let mut child_xyz_offset = Vec3::zeros();
        let mut parent_rpy_offset = Vec3::zeros();
        let mut child_rpy_offset = Vec3::zeros();
        let mut should_publish = false;
        let mut update_rate = 0.0;
        let mut topic_ns: Option<String> = None;

        let mut buf = Vec::new();
        let mut current_tag = String::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    current_tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                }
                Ok(Event::End(_)) => {
                    current_tag.clear();
                }
                Ok(Event::Text(e)) => {
                    let text = String::from_utf8_lossy(e.as_ref()).to_string();
                    match current_tag.as_str() {
                        "parentBodyName" => parent_body = Some(text),
                        "childBodyName" => child_body = Some(text),
                        "parentDipoleMoment" => {
                            parent_moment = parse_vec3(&current_tag, &text)?;
                        }
                        "childDipoleMoment" => {
                            child_moment = parse_vec3(&current_tag, &text)?;
                        }
                        "parentXyzOffset" => {
                            parent_xyz_offset = parse_vec3(&current_tag, &text)?;
                        }
                        "childXyzOffset" => {
                            child_xyz_offset = parse_vec3(&current_tag, &text)?;
                        }
                        "parentRpyOffset" => {
                            parent_rpy_offset = parse_vec3(&current_tag, &text)?;
                        }
                        "childRpyOffset" => {
                            child_rpy_offset = parse_vec3(&current_tag, &text)?;
                        }
                        "shouldPublish" => {
                            should_publish = parse_bool(&current_tag, &text)?;
                        }
                        "updateRate" => {
                            update_rate = parse_f64(&current_tag, &text)?;
                        }
                        "topicNs" => topic_ns = Some(text),
                        _ => {}
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(SdfError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        let parent_body = parent_body.ok_or(SdfError::MissingElement("parentBodyName"))?;
        let child_body = child_body.ok_or(SdfError::MissingElement("childBodyName"))?;
        // Messages default onto the parent body's namespace.
        let topic_ns = topic_ns.unwrap_or_else(|| parent_body.clone());

        Ok(Self {
            parent_body,
            child_body,
            parent_moment,
            child_moment,
            parent_xyz_offset,
            child_xyz_offset,
            parent_rpy_offset,
            child_rpy_offset,
            should_publish,
            update_rate,
            topic_ns,
        })
    }

    /// Magnet descriptor for the parent side.
    pub fn parent_magnet(&self) -> Magnet {
        Magnet::new(
            self.parent_moment,
            offset_pose(&self.parent_xyz_offset, &self.parent_rpy_offset),
        )
    }

    /// Magnet descriptor for the child side.
    pub fn child_magnet(&self) -> Magnet {
        Magnet::new(
            self.child_moment,
            offset_pose(&self.child_xyz_offset, &self.child_rpy_offset),
        )
    }
}

fn offset_pose(xyz: &Vec3, rpy: &Vec3) -> Pose {
    Pose::new(*xyz, Quat::from_rpy(rpy.x, rpy.y, rpy.z))
}

fn parse_vec3(element: &str, text: &str) -> Result<Vec3> {
    let parts: std::result::Result<Vec<f64>, _> =
        text.split_whitespace().map(str::parse).collect();
    match parts {
        Ok(v) if v.len() == 3 => Ok(Vec3::new(v[0], v[1], v[2])),
        _ => Err(SdfError::InvalidValue {
            element: element.to_string(),
            value: text.to_string(),
        }),
    }
}

fn parse_f64(element: &str, text: &str) -> Result<f64> {
    text.parse().map_err(|_| SdfError::InvalidValue {
        element: element.to_string(),
        value: text.to_string(),
    })
}

fn parse_bool(element: &str, text: &str) -> Result<bool> {
    match text {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(SdfError::InvalidValue {
            element: element.to_string(),
            value: text.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const FULL: &str = r#"
        <plugin>
            <parentBodyName>base_link</parentBodyName>
            <childBodyName>capsule</childBodyName>
            <parentDipoleMoment>0 0 1.26</parentDipoleMoment>
            <childDipoleMoment>0 0 0.04</childDipoleMoment>
            <parentXyzOffset>0 0 0.05</parentXyzOffset>
            <childXyzOffset>0.01 0 0</childXyzOffset>
            <parentRpyOffset>0 0 1.5707963267948966</parentRpyOffset>
            <childRpyOffset>0 0 0</childRpyOffset>
            <shouldPublish>true</shouldPublish>
            <updateRate>50</updateRate>
            <topicNs>magnet</topicNs>
        </plugin>
    "#;

    #[test]
    fn parses_full_block() {
        let cfg = PairConfig::from_xml_str(FULL).unwrap();
        assert_eq!(cfg.parent_body, "base_link");
        assert_eq!(cfg.child_body, "capsule");
        assert_relative_eq!(cfg.parent_moment.z, 1.26);
        assert_relative_eq!(cfg.child_moment.z, 0.04);
        assert_relative_eq!(cfg.parent_xyz_offset.z, 0.05);
        assert_relative_eq!(cfg.child_xyz_offset.x, 0.01);
        assert!(cfg.should_publish);
        assert_relative_eq!(cfg.update_rate, 50.0);
        assert_eq!(cfg.topic_ns, "magnet");
    }

    #[test]
    fn defaults_apply() {
        let cfg = PairConfig::from_xml_str(
            "<plugin>\
                <parentBodyName>a</parentBodyName>\
                <childBodyName>b</childBodyName>\
             </plugin>",
        )
        .unwrap();
        assert_eq!(cfg.parent_moment, Vec3::zeros());
        assert_eq!(cfg.child_moment, Vec3::zeros());
        assert!(!cfg.should_publish);
        assert_relative_eq!(cfg.update_rate, 0.0);
        // topicNs falls back to the parent body name.
        assert_eq!(cfg.topic_ns, "a");
    }

    #[test]
    fn missing_body_name_is_an_error() {
        let err = PairConfig::from_xml_str("<plugin><childBodyName>b</childBodyName></plugin>")
            .unwrap_err();
        assert!(matches!(err, SdfError::MissingElement("parentBodyName")));

        let err = PairConfig::from_xml_str("<plugin><parentBodyName>a</parentBodyName></plugin>")
            .unwrap_err();
        assert!(matches!(err, SdfError::MissingElement("childBodyName")));
    }

    #[test]
    fn malformed_vector_is_an_error() {
        let err = PairConfig::from_xml_str(
            "<plugin>\
                <parentBodyName>a</parentBodyName>\
                <childBodyName>b</childBodyName>\
                <parentDipoleMoment>0 0</parentDipoleMoment>\
             </plugin>",
        )
        .unwrap_err();
        assert!(matches!(err, SdfError::InvalidValue { .. }));
    }

    #[test]
    fn magnets_carry_offsets() {
        let cfg = PairConfig::from_xml_str(FULL).unwrap();
        let parent = cfg.parent_magnet();
        assert_relative_eq!(parent.offset.pos.z, 0.05);

        // Parent rpy offset is a 90 degree yaw: local +X maps to world +Y.
        let rotated = parent.offset.rot.rotate(&Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(rotated.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(rotated.y, 1.0, epsilon = 1e-12);

        let child = cfg.child_magnet();
        assert_relative_eq!(child.offset.pos.x, 0.01);
        assert_eq!(child.offset.rot, Quat::identity());
    }
}
