//! Demo catalog used by the `seed` binary and the integration tests.

use crate::domain::model::Listing;
use uuid::Uuid;

struct DemoListing {
    title: &'static str,
    location: &'static str,
    price: f64,
    description: &'static str,
    image_ref: &'static str,
}

const DEMO_LISTINGS: &[DemoListing] = &[
    DemoListing {
        title: "Beachside Cottage in Goa",
        location: "Goa",
        price: 3200.0,
        description: "A cozy beachside stay with WiFi and AC.",
        image_ref: "https://a0.muscache.com/im/pictures/miso/Hosting-24546848/original/2a06d56a-e907-40d0-bd01-4105f9b89b32.jpeg",
    },
    DemoListing {
        title: "Luxury Flat in Mumbai",
        location: "Mumbai",
        price: 5400.0,
        description: "2BHK with a sea view and balcony.",
        image_ref: "https://i.pinimg.com/originals/14/b6/eb/14b6eb0c033c4b5ad7ac34429e1f7c3b.jpg",
    },
    DemoListing {
        title: "Mountain View Cottage in Manali",
        location: "Manali",
        price: 2500.0,
        description: "Enjoy peaceful mornings with breathtaking views of the Himalayas.",
        image_ref: "https://res.cloudinary.com/simplotel/image/upload/x_64,y_412,w_843,h_475,r_0,c_crop,q_80,fl_progressive/w_910,f_auto,c_fit/clarks-inn-suites-manali/_LAL1851_edit_f27cgo.jpg",
    },
    DemoListing {
        title: "Heritage Villa by the Lake",
        location: "Udaipur",
        price: 4000.0,
        description: "Traditional Rajasthani villa with modern comfort by the lakefront.",
        image_ref: "https://www.thelalit.com/wp-content/uploads/2022/03/The-LALIT-Udaipur_01.jpg",
    },
];

/// Fresh listings (new ids) for the demo catalog, all owned by `host_id`.
pub fn demo_listings(host_id: Uuid) -> Vec<Listing> {
    DEMO_LISTINGS
        .iter()
        .map(|d| Listing {
            id: Uuid::new_v4(),
            title: d.title.to_string(),
            location: d.location.to_string(),
            price: d.price,
            description: d.description.to_string(),
            image_ref: d.image_ref.to_string(),
            host_id,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_catalog_has_four_priced_listings() {
        let host = Uuid::new_v4();
        let listings = demo_listings(host);
        let prices: Vec<f64> = listings.iter().map(|l| l.price).collect();
        assert_eq!(prices, vec![3200.0, 5400.0, 2500.0, 4000.0]);
        assert!(listings.iter().all(|l| l.host_id == host));
    }
}
