pub mod area_map;
