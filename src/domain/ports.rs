use crate::domain::model::ContactFields;

pub trait ConfigProvider {
    fn prompt(&self) -> &str;
    fn seed_contacts(&self) -> &[ContactFields];
}
