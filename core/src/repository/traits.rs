use crate::model::app_data::AppData;
use anyhow::Result;

pub trait AppDataRepository {
    fn load(&self) -> Result<AppData>;
    fn save(&self, data: &AppData) -> Result<()>;
}

impl<T: AppDataRepository + ?Sized> AppDataRepository for &T {
    fn load(&self) -> Result<AppData> {
        (**self).load()
    }

    fn save(&self, data: &AppData) -> Result<()> {
        (**self).save(data)
    }
}
