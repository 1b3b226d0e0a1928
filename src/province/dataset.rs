//! Built-in province table (63 provinces and centrally-run municipalities)

pub const REGION_NORTH: &str = "Miền Bắc";
pub const REGION_CENTRAL: &str = "Miền Trung";
pub const REGION_SOUTH: &str = "Miền Nam";

/// `(id, name, region)` in display order: north to south.
pub const BUILTIN_PROVINCES: &[(&str, &str, &str)] = &[
    // Miền Bắc
    ("ha-noi", "Hà Nội", REGION_NORTH),
    ("hai-phong", "Hải Phòng", REGION_NORTH),
    ("ha-giang", "Hà Giang", REGION_NORTH),
    ("cao-bang", "Cao Bằng", REGION_NORTH),
    ("bac-kan", "Bắc Kạn", REGION_NORTH),
    ("tuyen-quang", "Tuyên Quang", REGION_NORTH),
    ("lao-cai", "Lào Cai", REGION_NORTH),
    ("dien-bien", "Điện Biên", REGION_NORTH),
    ("lai-chau", "Lai Châu", REGION_NORTH),
    ("son-la", "Sơn La", REGION_NORTH),
    ("yen-bai", "Yên Bái", REGION_NORTH),
    ("hoa-binh", "Hòa Bình", REGION_NORTH),
    ("thai-nguyen", "Thái Nguyên", REGION_NORTH),
    ("lang-son", "Lạng Sơn", REGION_NORTH),
    ("quang-ninh", "Quảng Ninh", REGION_NORTH),
    ("bac-giang", "Bắc Giang", REGION_NORTH),
    ("phu-tho", "Phú Thọ", REGION_NORTH),
    ("vinh-phuc", "Vĩnh Phúc", REGION_NORTH),
    ("bac-ninh", "Bắc Ninh", REGION_NORTH),
    ("hai-duong", "Hải Dương", REGION_NORTH),
    ("hung-yen", "Hưng Yên", REGION_NORTH),
    ("thai-binh", "Thái Bình", REGION_NORTH),
    ("ha-nam", "Hà Nam", REGION_NORTH),
    ("nam-dinh", "Nam Định", REGION_NORTH),
    ("ninh-binh", "Ninh Bình", REGION_NORTH),
    // Miền Trung
    ("thanh-hoa", "Thanh Hóa", REGION_CENTRAL),
    ("nghe-an", "Nghệ An", REGION_CENTRAL),
    ("ha-tinh", "Hà Tĩnh", REGION_CENTRAL),
    ("quang-binh", "Quảng Bình", REGION_CENTRAL),
    ("quang-tri", "Quảng Trị", REGION_CENTRAL),
    ("thua-thien-hue", "Thừa Thiên Huế", REGION_CENTRAL),
    ("da-nang", "Đà Nẵng", REGION_CENTRAL),
    ("quang-nam", "Quảng Nam", REGION_CENTRAL),
    ("quang-ngai", "Quảng Ngãi", REGION_CENTRAL),
    ("binh-dinh", "Bình Định", REGION_CENTRAL),
    ("phu-yen", "Phú Yên", REGION_CENTRAL),
    ("khanh-hoa", "Khánh Hòa", REGION_CENTRAL),
    ("ninh-thuan", "Ninh Thuận", REGION_CENTRAL),
    ("binh-thuan", "Bình Thuận", REGION_CENTRAL),
    ("kon-tum", "Kon Tum", REGION_CENTRAL),
    ("gia-lai", "Gia Lai", REGION_CENTRAL),
    ("dak-lak", "Đắk Lắk", REGION_CENTRAL),
    ("dak-nong", "Đắk Nông", REGION_CENTRAL),
    ("lam-dong", "Lâm Đồng", REGION_CENTRAL),
    // Miền Nam
    ("ho-chi-minh", "Hồ Chí Minh", REGION_SOUTH),
    ("binh-phuoc", "Bình Phước", REGION_SOUTH),
    ("tay-ninh", "Tây Ninh", REGION_SOUTH),
    ("binh-duong", "Bình Dương", REGION_SOUTH),
    ("dong-nai", "Đồng Nai", REGION_SOUTH),
    ("ba-ria-vung-tau", "Bà Rịa - Vũng Tàu", REGION_SOUTH),
    ("long-an", "Long An", REGION_SOUTH),
    ("tien-giang", "Tiền Giang", REGION_SOUTH),
    ("ben-tre", "Bến Tre", REGION_SOUTH),
    ("tra-vinh", "Trà Vinh", REGION_SOUTH),
    ("vinh-long", "Vĩnh Long", REGION_SOUTH),
    ("dong-thap", "Đồng Tháp", REGION_SOUTH),
    ("an-giang", "An Giang", REGION_SOUTH),
    ("kien-giang", "Kiên Giang", REGION_SOUTH),
    ("can-tho", "Cần Thơ", REGION_SOUTH),
    ("hau-giang", "Hậu Giang", REGION_SOUTH),
    ("soc-trang", "Sóc Trăng", REGION_SOUTH),
    ("bac-lieu", "Bạc Liêu", REGION_SOUTH),
    ("ca-mau", "Cà Mau", REGION_SOUTH),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn builtin_has_sixty_three_entries() {
        assert_eq!(BUILTIN_PROVINCES.len(), 63);
    }

    #[test]
    fn builtin_ids_are_unique() {
        let ids: HashSet<_> = BUILTIN_PROVINCES.iter().map(|(id, _, _)| *id).collect();
        assert_eq!(ids.len(), BUILTIN_PROVINCES.len());
    }

    #[test]
    fn builtin_regions_are_known() {
        for (id, _, region) in BUILTIN_PROVINCES {
            assert!(
                [REGION_NORTH, REGION_CENTRAL, REGION_SOUTH].contains(region),
                "unexpected region for {}",
                id
            );
        }
    }
}
