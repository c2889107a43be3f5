//! Path data for the generated SVG primitives.
//!
//! The paths are drawn in a 1000-unit-per-em coordinate system. They
//! are opaque data as far as the builders are concerned; the stretchy
//! subsystem picks them by name and scales the viewBox.

use phf::{Map, phf_map};

static PATHS: Map<&'static str, &'static str> = phf_map! {
    // Radical signs at increasing sizes. The tall variant is extended
    // vertically by the surd assembly.
    "sqrtMain" => "M95,702c-2.7,0,-7.17,-2.7,-13.5,-8c-5.8,-5.3,-9.5,-10,-9.5,-14\
c0,-2,0.3,-3.3,1,-4c1.3,-2.7,23.83,-20.7,67.5,-54c44.2,-33.3,65.8,-50.3,66.5,\
-51c1.3,-1.3,3,-2,5,-2c4.7,0,8.7,3.3,12,10s173,378,173,378c0.7,0,35.3,-71,104,\
-213c68.7,-142,137.5,-285,206.5,-429c69,-144,104.5,-217.7,106.5,-221c5.3,-9.3,\
12,-14,20,-14H400000v40H845.2724s-225.272,467,-225.272,467s-235,486,-235,486c\
-2.7,4.7,-9,7,-19,7c-6,0,-10,-1,-12,-3s-194,-422,-194,-422s-65,47,-65,47z M834 80h400000v40h-400000z",
    "sqrtSize1" => "M263,681c0.7,0,18,39.7,52,119c34,79.3,68.167,158.7,102.5,238c\
34.3,79.3,51.8,119.3,52.5,120c340,-704.7,510.7,-1060.3,512,-1067c4.7,-7.3,11,\
-11,19,-11H40000v40H1012.3s-271.3,567,-271.3,567c-38.7,80.7,-84,175,-136,283c\
-52,108,-89.167,185.3,-111.5,232c-22.3,46.7,-33.8,70.3,-34.5,71c-4.7,4.7,-12.3,\
7,-23,7s-12,-1,-12,-1s-109,-253,-109,-253c-72.7,-168,-109.3,-252,-110,-252c-10.7,\
8,-22,16.7,-34,26c-22,17.3,-33.3,26,-34,26s-26,-26,-26,-26s76,-59,76,-59s76,-60,\
76,-60z M1001 80h400000v40h-400000z",
    "sqrtSize2" => "M983 90l0 -0c4,-6.7,10,-10,18,-10H400000v40H1013.1s-83.4,268,\
-264.1,840c-180.7,572,-277,876.3,-289,913c-4.7,4.7,-12.7,7,-24,7s-12,0,-12,0c\
-1.3,-3.3,-3.7,-11.7,-7,-25c-35.3,-125.3,-106.7,-373.3,-214,-744c-10,12,-21,25,\
-33,39s-32,39,-32,39c-6,-5.3,-15,-14,-27,-26s25,-30,25,-30c26.7,-32.7,52,-63,\
76,-91s52,-60,52,-60s208,722,208,722c56,-175.3,126.3,-397.3,211,-666c84.7,\
-268.7,153.8,-488.2,207.5,-658.5c53.7,-170.3,84.5,-266.8,92.5,-289.5z\
M1001 80h400000v40h-400000z",
    "sqrtSize3" => "M424,2478c-1.3,-0.7,-38.5,-172,-111.5,-514c-73,-342,-109.8,\
-513.3,-110.5,-514c0,-2,-10.7,14.3,-32,49c-4.7,7.3,-9.8,15.7,-15.5,25c-5.7,9.3,\
-9.8,16,-12.5,20s-5,7,-5,7c-4,-3.3,-8.3,-7.7,-13,-13s-13,-13,-13,-13s76,-122,\
76,-122s77,-121,77,-121s209,968,209,968c0,-2,84.7,-361.7,254,-1079c169.3,\
-717.3,254.7,-1077.7,256,-1081c4,-6.7,10,-10,18,-10H400000v40H1014.6s-87.3,378.7,\
-272.6,1166c-185.3,787.3,-279.3,1182.3,-282,1185c-2,6,-10,9,-24,9c-8,0,-12,-0.7,\
-12,-2z M1001 80h400000v40h-400000z",
    "sqrtSize4" => "M473,2793c339.3,-1799.3,509.3,-2700,510,-2702l0 -0c3.3,-7.3,\
9.3,-11,18,-11H400000v40H1017.7s-90.5,478,-276.2,1466c-185.7,988,-279.5,1483,\
-281.5,1485c-2,6,-10,9,-24,9c-8,0,-12,-0.7,-12,-2c-1.3,-1.3,-3.7,-11.7,-7,-31c\
-35.3,-199.3,-106.7,-618,-214,-1256c-10,12,-21,25,-33,39s-32,39,-32,39c-6,-5.3,\
-15,-14,-27,-26s25,-30,25,-30c26.7,-32.7,52,-63,76,-91s52,-60,52,-60s208,722,\
208,722z M1001 80h400000v40h-400000z",
    "sqrtTall" => "M702 80H400000v40H742v3010c-5.3,9.3,-12,14,-20,14H692c-8,0,\
-14.7,-4.7,-20,-14c-1.3,-2.7,-38,-179.3,-110,-530c-72,-350.7,-108.3,-526.7,\
-109,-528c0,-2,-10.7,14.3,-32,49c-4.7,7.3,-9.8,15.7,-15.5,25c-5.7,9.3,-9.8,16,\
-12.5,20s-5,7,-5,7c-4,-3.3,-8.3,-7.7,-13,-13s-13,-13,-13,-13s76,-122,76,-122s\
77,-121,77,-121s209,968,209,968c0,-2,84.7,-361.7,254,-1079z",
    // Accent and arrow bodies.
    "vec" => "M377 20c0,-5.3,1.8,-10,5.5,-14c3.7,-4,8.2,-6,13.5,-6c5.3,0,9.8,2,\
13.5,6c3.7,4,5.5,8.7,5.5,14c0,5.3,-1.8,10,-5.5,14c-3.7,4,-8.2,6,-13.5,6l-240 0\
c-5.3,0,-9.8,-2,-13.5,-6c-3.7,-4,-5.5,-8.7,-5.5,-14z M94 0h40v40h-40z",
    "widehat1" => "M529 0h5l519 115c5 1 9 5 9 10 0 1-1 2-1 3l-4 22c-1 5-5 9-11 9h-2L545 67 19 159h-2c-5 0-9-4-11-9l-5-22c-1-6 2-12 8-13z",
    "widehat2" => "M1181 0h2l1171 176c6 0 10 5 10 11l-2 23c-1 6-5 10-11 10h-1L1182 67 15 220h-1c-6 0-10-4-11-10l-2-23c-1-6 4-11 10-11z",
    "widehat3" => "M1181 0h2l1171 236c6 0 10 5 10 11l-2 23c-1 6-5 10-11 10h-1L1182 67 15 280h-1c-6 0-10-4-11-10l-2-23c-1-6 4-11 10-11z",
    "widehat4" => "M1181 0h2l1171 296c6 0 10 5 10 11l-2 23c-1 6-5 10-11 10h-1L1182 67 15 340h-1c-6 0-10-4-11-10l-2-23c-1-6 4-11 10-11z",
    "widetilde1" => "M200 55.538c-77 0-168 73.953-177 73.953-3 0-7-2.175-9-5.437L2 97c-1-2-2-4-2-6 0-4 2-7 5-9l20-12C116 12 171 0 207 0c86 0 114 68 191 68 78 0 168-68 177-68 4 0 7 2 9 5l12 19c1 2.175 2 4.35 2 6.525 0 4.35-2 7.613-5 9.788l-19 13.05c-92 63.077-116.937 75.308-183 76.128-86 0-114-74.953-191-74.953z",
    "widetilde2" => "M344 55.266c-142 0-300.638 81.316-311.5 86.418-8.01 3.762-22.5 10.91-23.5 5.562L1 120c-1-2-1-3-1-4 0-5 3-9 8-10l18.5-9C298.77 9.72 354.68 0 416.6 0c120.88 0 156.82 62 254.4 62 95.77 0 233.3-68 265.5-68 5 0 9 3 10 8l7 22c1 1 1 2 1 3 0 5-3 9-8 10l-313.6 143.08c-83.6 29.7-141.34 37.39-206.3 37.39-86.6 0-126.6-60.6-214.6-60.6z",
    "widetilde3" => "M786 59c-396 0-901 241-901 241l-18-48s553-276 926-276c373 0 436 118 789 118 396 0 901-241 901-241l18 48s-553 276-926 276c-373 0-436-118-789-118z",
    "widetilde4" => "M786 58c-396 0-901 158-901 158l-18-48s553-193 926-193c373 0 436 101 789 101 396 0 901-158 901-158l18 48s-553 193-926 193c-373 0-436-101-789-101z",
    "rightarrow" => "M0 241v40h399891c-47.3 35.3-84 78-110 128-16.7 32-27.7 63.7-33 95 0 1.3-.2 2.7-.5 4-.3 1.3-.5 2.3-.5 3 0 7.3 6.7 11 20 11 8 0 13.2-.8 15.5-2.5 2.3-1.7 4.2-5.5 5.5-11.5 2-13.3 5.7-27 11-41 14.7-44.7 39-84.5 73-119.5s73.7-60.2 119-75.5c6-2 9-5.7 9-11s-3-9-9-11c-45.3-15.3-85-40.5-119-75.5s-58.3-74.8-73-119.5c-4.7-14-8.3-27.3-11-40-1.3-6.7-3.2-10.8-5.5-12.5-2.3-1.7-7.5-2.5-15.5-2.5-14 0-21 3.7-21 11 0 2 2 10.3 6 25 20.7 83.3 67 151.7 139 205zm0 0v40h399900v-40z",
    "leftarrow" => "M400000 241H110l3-3c68.7-52.7 113.7-120 135-202 4-14.7 6-23 6-25 0-7.3-7-11-21-11-8 0-13.2.8-15.5 2.5-2.3 1.7-4.2 5.8-5.5 12.5-1.3 4.7-2.7 10.3-4 17-12 48.7-34.8 92-68.5 130S65.3 228.3 18 247c-10 4-16 7.7-18 11 0 8.7 6 14.3 18 17 47.3 18.7 87.8 47 121.5 85S196 441.3 208 490c.7 2 1.3 5 2 9s1.2 6.7 1.5 8c.3 1.3 1 3.3 2 6s2.2 4.5 3.5 5.5c1.3 1 3.3 1.8 6 2.5s6 1 10 1c14 0 21-3.7 21-11 0-2-2-10.3-6-25-20-79.3-65-146.7-135-202l-3-3h399890z M100 241v40h399900v-40z",
    "leftrightarrow" => "M0 241v40h399891c-47.3 35.3-84 78-110 128-16.7 32-27.7 63.7-33 95 0 1.3-.2 2.7-.5 4-.3 1.3-.5 2.3-.5 3 0 7.3 6.7 11 20 11 8 0 13.2-.8 15.5-2.5 2.3-1.7 4.2-5.5 5.5-11.5 2-13.3 5.7-27 11-41 14.7-44.7 39-84.5 73-119.5s73.7-60.2 119-75.5c6-2 9-5.7 9-11s-3-9-9-11c-45.3-15.3-85-40.5-119-75.5s-58.3-74.8-73-119.5c-4.7-14-8.3-27.3-11-40-1.3-6.7-3.2-10.8-5.5-12.5-2.3-1.7-7.5-2.5-15.5-2.5-14 0-21 3.7-21 11 0 2 2 10.3 6 25 20.7 83.3 67 151.7 139 205zm96 0v40h399900v-40z",
    "doublerightarrow" => "M399738 392l-4 4-4 4c-.1.1-5.1 8.7-15.1 25.9-10 17.2-15 26.4-15 27.6 0 1.9 1.2 3.3 3.5 4.4l2.5 1h5l1-1c21.3-35.3 47.2-65.2 77.5-89.5 30.3-24.3 64.2-43 101.5-56.2 6.7-2 10-5.3 10-10s-3.3-8-10-10c-37.3-13.2-71.2-31.9-101.5-56.2-30.3-24.3-56.2-54.2-77.5-89.5l-1-1h-5l-2.5 1c-2.3 1.1-3.5 2.5-3.5 4.4 0 1.2 5 10.4 15 27.6 10 17.2 15 25.8 15.1 25.9l4 4 4 4H0v40h399782c-.2.3-1.9 2.2-5.1 5.7-3.2 3.5-5.1 5.7-5.1 5.8l-4 5-4 5H0v40z",
    "doubleleftarrow" => "M262 392l4 4 4 4c.1.1 5.1 8.7 15.1 25.9 10 17.2 15 26.4 15 27.6 0 1.9-1.2 3.3-3.5 4.4l-2.5 1h-5l-1-1c-21.3-35.3-47.2-65.2-77.5-89.5-30.3-24.3-64.2-43-101.5-56.2-6.7-2-10-5.3-10-10s3.3-8 10-10c37.3-13.2 71.2-31.9 101.5-56.2 30.3-24.3 56.2-54.2 77.5-89.5l1-1h5l2.5 1c2.3 1.1 3.5 2.5 3.5 4.4 0 1.2-5 10.4-15 27.6-10 17.2-15 25.8-15.1 25.9l-4 4-4 4h399738v40H218c.2.3 1.9 2.2 5.1 5.7 3.2 3.5 5.1 5.7 5.1 5.8l4 5 4 5h399738v40z",
    "doubleleftrightarrow" => "M262 392l4 4 4 4c.1.1 5.1 8.7 15.1 25.9 10 17.2 15 26.4 15 27.6 0 1.9-1.2 3.3-3.5 4.4l-2.5 1h-5l-1-1c-21.3-35.3-47.2-65.2-77.5-89.5-30.3-24.3-64.2-43-101.5-56.2-6.7-2-10-5.3-10-10s3.3-8 10-10c37.3-13.2 71.2-31.9 101.5-56.2 30.3-24.3 56.2-54.2 77.5-89.5l1-1h5l2.5 1c2.3 1.1 3.5 2.5 3.5 4.4 0 1.2-5 10.4-15 27.6-10 17.2-15 25.8-15.1 25.9l-4 4-4 4h399210l-4-4-4-4c-.1-.1-5.1-8.7-15.1-25.9-10-17.2-15-26.4-15-27.6 0-1.9 1.2-3.3 3.5-4.4l2.5-1h5l1 1c21.3 35.3 47.2 65.2 77.5 89.5 30.3 24.3 64.2 43 101.5 56.2 6.7 2 10 5.3 10 10s-3.3 8-10 10c-37.3 13.2-71.2 31.9-101.5 56.2-30.3 24.3-56.2 54.2-77.5 89.5l-1 1h-5l-2.5-1c-2.3-1.1-3.5-2.5-3.5-4.4 0-1.2 5-10.4 15-27.6 10-17.2 15-25.8 15.1-25.9l4-4 4-4H262z",
    "mapsto" => "M0 241v40h399891c-47.3 35.3-84 78-110 128-16.7 32-27.7 63.7-33 95 0 1.3-.2 2.7-.5 4-.3 1.3-.5 2.3-.5 3 0 7.3 6.7 11 20 11 8 0 13.2-.8 15.5-2.5 2.3-1.7 4.2-5.5 5.5-11.5 2-13.3 5.7-27 11-41 14.7-44.7 39-84.5 73-119.5s73.7-60.2 119-75.5c6-2 9-5.7 9-11s-3-9-9-11c-45.3-15.3-85-40.5-119-75.5s-58.3-74.8-73-119.5c-4.7-14-8.3-27.3-11-40-1.3-6.7-3.2-10.8-5.5-12.5-2.3-1.7-7.5-2.5-15.5-2.5-14 0-21 3.7-21 11 0 2 2 10.3 6 25 20.7 83.3 67 151.7 139 205zm0 0v40h399900v-40zM40 56h40v320h-40z",
    "hookrightarrow" => "M399859 241c-47.3 35.3-84 78-110 128-16.7 32-27.7 63.7-33 95 0 1.3-.2 2.7-.5 4-.3 1.3-.5 2.3-.5 3 0 7.3 6.7 11 20 11 8 0 13.2-.8 15.5-2.5 2.3-1.7 4.2-5.5 5.5-11.5 2-13.3 5.7-27 11-41 14.7-44.7 39-84.5 73-119.5s73.7-60.2 119-75.5c6-2 9-5.7 9-11s-3-9-9-11c-45.3-15.3-85-40.5-119-75.5s-58.3-74.8-73-119.5c-4.7-14-8.3-27.3-11-40-1.3-6.7-3.2-10.8-5.5-12.5-2.3-1.7-7.5-2.5-15.5-2.5-14 0-21 3.7-21 11 0 2 2 10.3 6 25 20.7 83.3 67 151.7 139 205H96c-41.3 0-75-33.7-75-75s33.7-75 75-75h40v-40H96C43 16 0 59 0 112s43 96 96 96h399763v33z",
    "hookleftarrow" => "M400000 281H103s-33-11.2-61-33.5S0 197.3 0 164s14-59.3 42-81.5S103 49 103 49h397897v-40H103C46.1 9 0 55.1 0 112s46.1 103 103 103h397897v66z M141 241c47.3 35.3 84 78 110 128 16.7 32 27.7 63.7 33 95 0 1.3.2 2.7.5 4 .3 1.3.5 2.3.5 3 0 7.3-6.7 11-20 11-8 0-13.2-.8-15.5-2.5-2.3-1.7-4.2-5.5-5.5-11.5-2-13.3-5.7-27-11-41-14.7-44.7-39-84.5-73-119.5s-73.7-60.2-119-75.5c-6-2-9-5.7-9-11s3-9 9-11c45.3-15.3 85-40.5 119-75.5s58.3-74.8 73-119.5c4.7-14 8.3-27.3 11-40 1.3-6.7 3.2-10.8 5.5-12.5 2.3-1.7 7.5-2.5 15.5-2.5 14 0 21 3.7 21 11 0 2-2 10.3-6 25-20.7 83.3-67 151.7-139 205z",
    "overbrace" => "M6 548l-6-6v-35l6-11c56-104 135.3-181.3 238-232 57.3-28.7 117-45 179-50h399577v120H403 c-43.3 7-81 15-113 26-100.7 33-179.7 91-237 174-2.7 5-6 9-10 13-.7 1-7.3 1-20 1H6z M800 548h36l6-11c56-104 135.3-181.3 238-232 57.3-28.7 117-45 179-50h399577v120H1203c-43.3 7-81 15-113 26-100.7 33-179.7 91-237 174z",
    "underbrace" => "M0 6l6-6h17c12.688 0 19.313.3 20 1 4 4 7.313 8.3 10 13 35.313 51.3 80.813 93.8 136.5 127.5 55.688 33.7 117.188 55.8 184.5 66.5 14 2.688 84.5 4 84.5 4h399382v120H403c-43.3 7-81 15-113 26-100.7 33-179.7 91-237 174-2.7 5-6 9-10 13-.7 1-7.3 1-20 1H6l-6-6v-35z",
    "overgroup" => "M400000 80H435C64 80 168.3 229.4 21 260c-5.9 1.2-18 0-18 0-2 0-3-1-3-3v-38c76-158 257-219 435-219h399565z",
    "undergroup" => "M400000 262H435C64 262 168.3 112.6 21 82c-5.9-1.2-18 0-18 0-2 0-3 1-3 3v38c76 158 257 219 435 219h399565z",
};

/// Fetches the path data for a named primitive; panics only on an
/// internal name mismatch, which the stretchy tables prevent.
pub fn path_data(name: &str) -> &'static str {
    PATHS.get(name).copied().unwrap_or_else(|| {
        log::warn!("No path data for '{name}'");
        ""
    })
}

/// Height in em of the tall radical variants, used when assembling a
/// surd taller than the largest font glyph.
pub const HLINE_PAD: f64 = 80.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths() {
        assert!(path_data("sqrtMain").starts_with("M95,702"));
        assert!(!path_data("rightarrow").is_empty());
        assert_eq!(path_data("definitely-missing"), "");
    }
}
