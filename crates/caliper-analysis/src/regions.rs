use caliper_core::models::rom::Region;

/// A joint keyword, its anatomical region and the everyday tasks that
/// depend on it.
#[derive(Debug, Clone, Copy)]
pub struct JointProfile {
    pub keyword: &'static str,
    pub region: Region,
    pub activities: &'static str,
}

const fn profile(keyword: &'static str, region: Region, activities: &'static str) -> JointProfile {
    JointProfile {
        keyword,
        region,
        activities,
    }
}

/// Checked in order; the first keyword contained in the joint name wins.
pub static JOINT_PROFILES: &[JointProfile] = &[
    profile("shoulder", Region::UpperExtremity, "overhead reaching and upper body dressing"),
    profile("elbow", Region::UpperExtremity, "feeding and personal hygiene"),
    profile("forearm", Region::UpperExtremity, "turning taps and door handles"),
    profile("wrist", Region::UpperExtremity, "grip and fine motor tasks"),
    profile("thumb", Region::UpperExtremity, "grasp and manipulation of small objects"),
    profile("finger", Region::UpperExtremity, "grasp and manipulation of small objects"),
    profile("hand", Region::UpperExtremity, "grasp and manipulation of small objects"),
    profile("hip", Region::LowerExtremity, "transfers and lower body dressing"),
    profile("knee", Region::LowerExtremity, "stair climbing and sit-to-stand transfers"),
    profile("ankle", Region::LowerExtremity, "gait and balance on uneven surfaces"),
    profile("foot", Region::LowerExtremity, "gait and balance on uneven surfaces"),
    profile("toe", Region::LowerExtremity, "push-off during gait"),
    profile("cervical", Region::Spine, "head turning for driving and road crossing"),
    profile("neck", Region::Spine, "head turning for driving and road crossing"),
    profile("thoracic", Region::Spine, "trunk rotation and reaching across the body"),
    profile("lumbar", Region::Spine, "bending and floor-level tasks"),
    profile("trunk", Region::Spine, "bending and floor-level tasks"),
    profile("spine", Region::Spine, "bending and floor-level tasks"),
    profile("back", Region::Spine, "bending and floor-level tasks"),
];

pub fn joint_profile(joint: &str) -> Option<&'static JointProfile> {
    let joint = joint.to_lowercase();
    JOINT_PROFILES.iter().find(|p| joint.contains(p.keyword))
}

/// Region for a joint name, or `None` for joints outside the table.
pub fn classify_joint(joint: &str) -> Option<Region> {
    joint_profile(joint).map(|p| p.region)
}
